use crate::core::rules::{first_match, Condition, Rule};

pub const UNKNOWN_CONTRACT_TYPE: &str = "Unknown / Other";

const CONTRACT_TYPE_RULES: &[Rule<&str>] = &[
    Rule::new(
        Condition::AllOf(&["employee", "employer"]),
        "Employment Agreement",
    ),
    Rule::new(Condition::AllOf(&["service", "fees"]), "Service Agreement"),
    Rule::new(Condition::AnyOf(&["vendor", "supply"]), "Vendor Agreement"),
    Rule::new(Condition::AnyOf(&["lease", "rent"]), "Lease Agreement"),
    Rule::new(Condition::AnyOf(&["partnership"]), "Partnership Deed"),
];

/// Classify the whole document by the first satisfied keyword rule.
pub fn classify_contract_type(text: &str) -> &'static str {
    first_match(CONTRACT_TYPE_RULES, text).unwrap_or(UNKNOWN_CONTRACT_TYPE)
}
