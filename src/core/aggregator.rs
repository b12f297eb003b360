use crate::domain::model::{AttentionItem, ClauseAssessment, RiskLevel};

#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub overall_risk: RiskLevel,
    pub high_risk_count: usize,
    pub attention: Vec<AttentionItem>,
}

/// Document-level verdict from the number of High-risk clauses.
pub fn overall_risk(high_risk_count: usize) -> RiskLevel {
    match high_risk_count {
        0 | 1 => RiskLevel::Low,
        2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Reduce evaluated assessments to a verdict and the clauses needing review.
///
/// The attention list keeps every Medium or High clause in document order,
/// independently of the verdict.
pub fn aggregate(assessments: &[ClauseAssessment]) -> RiskSummary {
    let high_risk_count = assessments
        .iter()
        .filter(|a| a.risk == RiskLevel::High)
        .count();

    let attention = assessments
        .iter()
        .filter(|a| a.risk.needs_attention())
        .map(|a| AttentionItem {
            ordinal: a.ordinal,
            number: a.number.clone(),
            clause: a.clause.clone(),
            risk: a.risk,
            triggers: a.risk_triggers.clone(),
        })
        .collect();

    RiskSummary {
        overall_risk: overall_risk(high_risk_count),
        high_risk_count,
        attention,
    }
}
