use crate::domain::model::ClauseCategory;

/// Canonical SME-friendly wording each category is compared against.
pub fn standard_clause(category: ClauseCategory) -> &'static str {
    match category {
        ClauseCategory::Termination => {
            "Either party may terminate this agreement by giving reasonable prior written notice without cause."
        }
        ClauseCategory::Indemnity => {
            "Each party shall indemnify the other only for direct losses arising from breach, subject to reasonable limits."
        }
        ClauseCategory::NonCompete => {
            "The employee shall not engage in competing business during employment only, within reasonable limits."
        }
        ClauseCategory::Jurisdiction => {
            "This agreement shall be governed by Indian law and subject to courts where the company is registered."
        }
        ClauseCategory::Confidentiality => {
            "Confidential information shall not be disclosed during or after employment except as required by law."
        }
    }
}
