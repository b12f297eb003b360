use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Contract text after extraction and language normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub language: String,
    pub translated: bool,
}

/// A contiguous unit of contract text, optionally numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub ordinal: usize,
    pub label: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObligationType {
    Prohibition,
    Obligation,
    Right,
    Neutral,
}

impl ObligationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prohibition => "Prohibition",
            Self::Obligation => "Obligation",
            Self::Right => "Right",
            Self::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Medium | Self::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard clause types that have a canonical template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseCategory {
    Termination,
    Indemnity,
    #[serde(rename = "Non-Compete")]
    NonCompete,
    Jurisdiction,
    Confidentiality,
}

impl ClauseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Termination => "Termination",
            Self::Indemnity => "Indemnity",
            Self::NonCompete => "Non-Compete",
            Self::Jurisdiction => "Jurisdiction",
            Self::Confidentiality => "Confidentiality",
        }
    }
}

impl fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimilarityBucket {
    #[serde(rename = "Aligned with standard")]
    Aligned,
    #[serde(rename = "Partially deviates")]
    PartiallyDeviates,
    #[serde(rename = "Significantly deviates")]
    SignificantlyDeviates,
}

impl SimilarityBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aligned => "Aligned with standard",
            Self::PartiallyDeviates => "Partially deviates",
            Self::SignificantlyDeviates => "Significantly deviates",
        }
    }
}

/// Matched vocabulary for one assessment axis. Order follows the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityAssessment {
    pub ambiguous: bool,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateSimilarity {
    pub score: f64,
    pub bucket: SimilarityBucket,
}

/// Classification of one evaluated clause. Traced to its clause by `ordinal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAssessment {
    pub ordinal: usize,
    pub number: Option<String>,
    pub clause: String,
    pub obligation: ObligationType,
    pub risk: RiskLevel,
    pub risk_triggers: Vec<String>,
    pub ambiguous: bool,
    pub ambiguity_terms: Vec<String>,
    pub category: Option<ClauseCategory>,
    pub similarity_score: Option<f64>,
    pub similarity_flag: Option<SimilarityBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Entity spans bucketed by kind, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    #[serde(rename = "Parties")]
    pub parties: Vec<String>,
    #[serde(rename = "Dates")]
    pub dates: Vec<String>,
    #[serde(rename = "Amounts")]
    pub amounts: Vec<String>,
    #[serde(rename = "Locations")]
    pub locations: Vec<String>,
}

/// How much of the document the aggregated verdict covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationScope {
    pub segmented_clauses: usize,
    pub evaluated_clauses: usize,
    pub clause_cap: usize,
}

impl EvaluationScope {
    pub fn new(segmented_clauses: usize, clause_cap: usize) -> Self {
        Self {
            segmented_clauses,
            evaluated_clauses: segmented_clauses.min(clause_cap),
            clause_cap,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.evaluated_clauses < self.segmented_clauses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionItem {
    pub ordinal: usize,
    pub number: Option<String>,
    pub clause: String,
    pub risk: RiskLevel,
    pub triggers: Vec<String>,
}

/// Immutable result of auditing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub language: String,
    pub contract_type: String,
    pub entities: EntityBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub clauses: Vec<ClauseAssessment>,
    pub unfavorable_clauses: Vec<AttentionItem>,
    pub overall_risk: RiskLevel,
    pub evaluation_scope: EvaluationScope,
}
