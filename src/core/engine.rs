use crate::domain::model::AuditRecord;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Outcome of one successful document run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub record: AuditRecord,
    pub record_path: String,
}

/// Drives one document through extract, transform and load.
///
/// Any phase error aborts the run before `load`, so no record is persisted
/// for a failed document.
pub struct AuditEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AuditEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<AuditOutcome> {
        let started = Instant::now();
        tracing::info!("🚀 Starting contract audit");

        let record = self.analyze().await?;

        tracing::info!("💾 Saving audit record");
        let record_path = self.pipeline.load(record.clone()).await?;
        tracing::info!("Audit saved to {} in {:?}", record_path, started.elapsed());

        Ok(AuditOutcome {
            record,
            record_path,
        })
    }

    /// Extract and transform only. Nothing is written.
    pub async fn preview(&self) -> Result<AuditRecord> {
        tracing::info!("🧪 Dry run: the audit record will not be saved");
        self.analyze().await
    }

    async fn analyze(&self) -> Result<AuditRecord> {
        tracing::info!("📄 Extracting document text");
        let document = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} characters (language: {}, translated: {})",
            document.text.len(),
            document.language,
            document.translated
        );

        tracing::info!("🔎 Analyzing clauses");
        let record = self.pipeline.transform(document).await?;
        tracing::info!(
            "Analyzed {} of {} clauses, overall risk {}",
            record.evaluation_scope.evaluated_clauses,
            record.evaluation_scope.segmented_clauses,
            record.overall_risk
        );

        Ok(record)
    }
}
