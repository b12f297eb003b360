use crate::domain::model::{AuditRecord, Document, EntityBundle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn audit_dir(&self) -> &str;
    fn max_clauses(&self) -> usize;
    fn source_language(&self) -> &str;
    fn export_formats(&self) -> &[String];
    fn bundle_exports(&self) -> bool;
    fn summarize(&self) -> bool;
    fn explain_clauses(&self) -> bool;
    fn summary_char_limit(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Document>;
    async fn transform(&self, document: Document) -> Result<AuditRecord>;
    async fn load(&self, record: AuditRecord) -> Result<String>;
}

/// Binary document in, best-effort plain text out.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Returns a language code, or "unknown". Never fails.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> String;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract_entities(&self, text: &str) -> Result<EntityBundle>;
}

/// Similarity of two texts in [0, 1].
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn similarity(&self, text: &str, reference: &str) -> Result<f64>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// Durable, write-once persistence keyed by audit id.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn persist(&self, record: &AuditRecord) -> Result<String>;
}
