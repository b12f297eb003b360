//! Per-clause assessment: obligation type, risk, ambiguity, category and
//! deviation from the category's standard template.
//!
//! Each axis is evaluated independently on the same clause text. Only the
//! template comparison calls out to a collaborator.

use crate::core::rules::{first_match, matched_terms, Condition, Rule};
use crate::core::templates::standard_clause;
use crate::domain::model::{
    AmbiguityAssessment, Clause, ClauseAssessment, ClauseCategory, ObligationType,
    RiskAssessment, RiskLevel, SimilarityBucket, TemplateSimilarity,
};
use crate::domain::ports::SimilarityScorer;
use crate::utils::error::{AuditError, Result};

pub const RISK_TERMS: &[&str] = &[
    "indemnify",
    "penalty",
    "terminate at any time",
    "non-compete",
    "exclusive",
    "without limitation",
    "auto-renew",
    "lock-in",
    "sole discretion",
];

pub const AMBIGUITY_TERMS: &[&str] = &[
    "reasonable",
    "material",
    "as applicable",
    "from time to time",
    "best efforts",
    "commercially reasonable",
    "sole discretion",
    "as required",
    "as necessary",
];

// "shall not" must precede "shall".
const OBLIGATION_RULES: &[Rule<ObligationType>] = &[
    Rule::new(Condition::AnyOf(&["shall not"]), ObligationType::Prohibition),
    Rule::new(Condition::AnyOf(&["shall", "must"]), ObligationType::Obligation),
    Rule::new(Condition::AnyOf(&["may"]), ObligationType::Right),
];

const CATEGORY_RULES: &[Rule<ClauseCategory>] = &[
    Rule::new(Condition::AnyOf(&["terminate"]), ClauseCategory::Termination),
    Rule::new(Condition::AnyOf(&["indemnify"]), ClauseCategory::Indemnity),
    Rule::new(
        Condition::AnyOf(&["non-compete", "competing"]),
        ClauseCategory::NonCompete,
    ),
    Rule::new(
        Condition::AnyOf(&["jurisdiction", "court", "governed by"]),
        ClauseCategory::Jurisdiction,
    ),
    Rule::new(
        Condition::AnyOf(&["confidential"]),
        ClauseCategory::Confidentiality,
    ),
];

pub fn obligation_type(text: &str) -> ObligationType {
    first_match(OBLIGATION_RULES, text).unwrap_or(ObligationType::Neutral)
}

pub fn assess_risk(text: &str) -> RiskAssessment {
    let triggers = matched_terms(RISK_TERMS, text);
    let level = match triggers.len() {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    };
    RiskAssessment { level, triggers }
}

pub fn detect_ambiguity(text: &str) -> AmbiguityAssessment {
    let terms = matched_terms(AMBIGUITY_TERMS, text);
    AmbiguityAssessment {
        ambiguous: !terms.is_empty(),
        terms,
    }
}

pub fn identify_category(text: &str) -> Option<ClauseCategory> {
    first_match(CATEGORY_RULES, text)
}

/// Round to two decimals, the precision scores are recorded and bucketed at.
///
/// Rounds the exact binary value, so 0.745 (stored just below) becomes 0.74.
pub fn round_score(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}

pub fn similarity_bucket(score: f64) -> SimilarityBucket {
    if score >= 0.75 {
        SimilarityBucket::Aligned
    } else if score >= 0.5 {
        SimilarityBucket::PartiallyDeviates
    } else {
        SimilarityBucket::SignificantlyDeviates
    }
}

/// Compare a clause against the standard template for `category`.
pub async fn compare_to_template(
    scorer: &dyn SimilarityScorer,
    text: &str,
    category: ClauseCategory,
) -> Result<TemplateSimilarity> {
    let raw = scorer.similarity(text, standard_clause(category)).await?;
    if !raw.is_finite() {
        return Err(AuditError::service(
            "similarity",
            format!("non-finite similarity score {}", raw),
        ));
    }
    let score = round_score(raw.clamp(0.0, 1.0));
    Ok(TemplateSimilarity {
        score,
        bucket: similarity_bucket(score),
    })
}

/// Run every axis on one clause. The template comparison is skipped when the
/// clause has no category.
pub async fn assess_clause(
    clause: &Clause,
    scorer: &dyn SimilarityScorer,
) -> Result<ClauseAssessment> {
    let text = clause.text.as_str();
    let risk = assess_risk(text);
    let ambiguity = detect_ambiguity(text);
    let category = identify_category(text);

    let similarity = match category {
        Some(category) => Some(compare_to_template(scorer, text, category).await?),
        None => None,
    };

    tracing::debug!(
        "Clause {} (#{}) risk={} category={:?} similarity={:?}",
        clause.label.as_deref().unwrap_or("-"),
        clause.ordinal,
        risk.level,
        category,
        similarity.map(|s| s.score)
    );

    Ok(ClauseAssessment {
        ordinal: clause.ordinal,
        number: clause.label.clone(),
        clause: clause.text.clone(),
        obligation: obligation_type(text),
        risk: risk.level,
        risk_triggers: risk.triggers,
        ambiguous: ambiguity.ambiguous,
        ambiguity_terms: ambiguity.terms,
        category,
        similarity_score: similarity.map(|s| s.score),
        similarity_flag: similarity.map(|s| s.bucket),
        explanation: None,
    })
}
