//! First-match-wins keyword rules.
//!
//! Rule order carries the tie-break policy: text that satisfies several
//! rules resolves to the earliest one.

/// Keyword condition over lowercased text.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// Every keyword must be present.
    AllOf(&'static [&'static str]),
    /// At least one keyword must be present.
    AnyOf(&'static [&'static str]),
}

impl Condition {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::AllOf(keywords) => keywords.iter().all(|k| lowered.contains(k)),
            Self::AnyOf(keywords) => keywords.iter().any(|k| lowered.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub condition: Condition,
    pub outcome: T,
}

impl<T> Rule<T> {
    pub const fn new(condition: Condition, outcome: T) -> Self {
        Self { condition, outcome }
    }
}

/// Evaluate `rules` top to bottom against `text` (case-insensitive).
pub fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.condition.matches(&lowered))
        .map(|rule| rule.outcome)
}

/// Vocabulary entries found in `text`, in vocabulary order, each at most once.
pub fn matched_terms(vocabulary: &[&str], text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| lowered.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[Rule<u8>] = &[
        Rule::new(Condition::AllOf(&["alpha", "beta"]), 1),
        Rule::new(Condition::AnyOf(&["alpha", "gamma"]), 2),
    ];

    #[test]
    fn earlier_rule_wins_when_both_match() {
        assert_eq!(first_match(RULES, "Alpha and BETA"), Some(1));
    }

    #[test]
    fn all_of_requires_every_keyword() {
        assert_eq!(first_match(RULES, "alpha only"), Some(2));
        assert_eq!(first_match(RULES, "beta only"), None);
    }

    #[test]
    fn matched_terms_are_distinct_and_ordered() {
        let vocab = ["penalty", "lock-in", "exclusive"];
        let found = matched_terms(&vocab, "Exclusive penalty, another PENALTY");
        assert_eq!(found, vec!["penalty", "exclusive"]);
    }
}
