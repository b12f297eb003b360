use crate::core::aggregator::aggregate;
use crate::domain::model::{AuditRecord, ClauseAssessment, EntityBundle, EvaluationScope};
use chrono::Utc;
use uuid::Uuid;

/// Collects the per-document results and seals them into an [`AuditRecord`].
///
/// Nothing is produced until [`AuditRecordBuilder::build`] runs, so a failure
/// anywhere earlier leaves no partial record behind.
#[derive(Debug, Clone)]
pub struct AuditRecordBuilder {
    language: String,
    contract_type: String,
    entities: EntityBundle,
    summary: Option<String>,
    assessments: Vec<ClauseAssessment>,
    scope: EvaluationScope,
}

impl AuditRecordBuilder {
    pub fn new(language: impl Into<String>, contract_type: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            contract_type: contract_type.into(),
            entities: EntityBundle::default(),
            summary: None,
            assessments: Vec::new(),
            scope: EvaluationScope::new(0, 0),
        }
    }

    pub fn entities(mut self, entities: EntityBundle) -> Self {
        self.entities = entities;
        self
    }

    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn assessments(mut self, assessments: Vec<ClauseAssessment>, scope: EvaluationScope) -> Self {
        self.assessments = assessments;
        self.scope = scope;
        self
    }

    pub fn build(self) -> AuditRecord {
        let summary = aggregate(&self.assessments);

        let record = AuditRecord {
            audit_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            language: self.language,
            contract_type: self.contract_type,
            entities: self.entities,
            summary: self.summary,
            clauses: self.assessments,
            unfavorable_clauses: summary.attention,
            overall_risk: summary.overall_risk,
            evaluation_scope: self.scope,
        };

        tracing::info!(
            "🧾 Built audit {}: {} clauses evaluated, {} high risk, overall {}",
            record.audit_id,
            record.clauses.len(),
            summary.high_risk_count,
            record.overall_risk
        );
        record
    }
}
