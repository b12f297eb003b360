use crate::adapters::entities::PatternEntityExtractor;
use crate::adapters::openai::{
    ChatCompletionClient, EmbeddingSimilarity, LlmTranslator, OpenAiSettings,
};
use crate::adapters::similarity::LexicalSimilarity;
use crate::adapters::storage::FileAuditStore;
use crate::adapters::text::{PlainTextExtractor, ScriptLanguageDetector};
use crate::config::{AuditConfig, SimilarityBackend};
use crate::core::audit::AuditRecordBuilder;
use crate::core::classifier::assess_clause;
use crate::core::contract_type::classify_contract_type;
use crate::core::export;
use crate::core::segmenter::segment_clauses;
use crate::domain::model::{AuditRecord, Document, EvaluationScope};
use crate::domain::ports::{
    AuditStore, ConfigProvider, EntityExtractor, LanguageDetector, Pipeline, SimilarityScorer,
    Storage, TextExtractor, TextGenerator, Translator,
};
use crate::utils::error::{AuditError, Result};
use std::sync::Arc;

/// The external services one document run talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub extractor: Arc<dyn TextExtractor>,
    pub language: Arc<dyn LanguageDetector>,
    pub translator: Option<Arc<dyn Translator>>,
    pub entities: Arc<dyn EntityExtractor>,
    pub similarity: Arc<dyn SimilarityScorer>,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl Collaborators {
    /// Local heuristics only: no translation, summaries or explanations.
    pub fn offline() -> Self {
        Self {
            extractor: Arc::new(PlainTextExtractor),
            language: Arc::new(ScriptLanguageDetector),
            translator: None,
            entities: Arc::new(PatternEntityExtractor),
            similarity: Arc::new(LexicalSimilarity),
            generator: None,
        }
    }

    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        let mut services = Self::offline();
        if !config.needs_api() {
            return Ok(services);
        }

        let settings = OpenAiSettings {
            endpoint: config.llm.endpoint.clone(),
            api_key: config.api_key()?.to_string(),
            model: config.llm.model.clone(),
            embedding_model: config.similarity.embedding_model.clone(),
            timeout_seconds: config.llm.timeout_seconds,
        };

        if config.llm.enabled {
            let generator: Arc<dyn TextGenerator> =
                Arc::new(ChatCompletionClient::new(settings.clone())?);
            services.translator = Some(Arc::new(LlmTranslator::new(generator.clone())));
            services.generator = Some(generator);
        }
        if config.similarity.backend == SimilarityBackend::Embedding {
            services.similarity = Arc::new(EmbeddingSimilarity::new(settings)?);
        }

        Ok(services)
    }
}

pub struct ContractPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) services: Collaborators,
    pub(crate) store: Arc<dyn AuditStore>,
}

impl<S: Storage + Clone + 'static, C: ConfigProvider> ContractPipeline<S, C> {
    pub fn new(storage: S, config: C, services: Collaborators) -> Self {
        let store = Arc::new(FileAuditStore::new(storage.clone()));
        Self {
            storage,
            config,
            services,
            store,
        }
    }
}

impl<S: Storage, C: ConfigProvider> ContractPipeline<S, C> {
    fn generator(&self) -> Result<&Arc<dyn TextGenerator>> {
        self.services
            .generator
            .as_ref()
            .ok_or_else(|| AuditError::service("text generation", "no text generator configured"))
    }

    async fn summarize(&self, text: &str) -> Result<Option<String>> {
        if !self.config.summarize() {
            return Ok(None);
        }
        let excerpt: String = text.chars().take(self.config.summary_char_limit()).collect();
        let prompt = format!("Summarize this contract in simple business English:\n{}", excerpt);
        let summary = self.generator()?.generate(&prompt, 0.2).await?;
        Ok(Some(summary))
    }

    async fn explain(&self, clause: &str) -> Result<Option<String>> {
        if !self.config.explain_clauses() {
            return Ok(None);
        }
        let prompt = format!(
            "Explain this clause in simple business language and suggest a safer alternative:\n{}",
            clause
        );
        Ok(Some(self.generator()?.generate(&prompt, 0.1).await?))
    }

    /// Render every configured export as `(relative path, bytes)`. Pure, so it
    /// runs before anything is persisted.
    fn render_exports(&self, record: &AuditRecord) -> Result<Vec<(String, Vec<u8>)>> {
        let formats = self.config.export_formats();
        if formats.is_empty() {
            return Ok(Vec::new());
        }

        let id = record.audit_id.to_string();
        if self.config.bundle_exports() {
            let data = export::bundle(record, formats)?;
            return Ok(vec![(format!("exports/{}.zip", id), data)]);
        }

        formats
            .iter()
            .map(|format| {
                let content = export::render(record, format)?;
                Ok((
                    format!("exports/{}/legal_audit_report.{}", id, format),
                    content.into_bytes(),
                ))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ContractPipeline<S, C> {
    async fn extract(&self) -> Result<Document> {
        let path = self.config.input_path();
        tracing::info!("📥 Reading contract from: {}", path);

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AuditError::extraction(format!("cannot read {}: {}", path, e)))?;
        let raw_text = self.services.extractor.extract_text(&bytes)?;

        let language = self.services.language.detect(&raw_text);
        tracing::info!("🌐 Detected language: {}", language);

        if language != self.config.source_language() {
            return Ok(Document {
                text: raw_text,
                language,
                translated: false,
            });
        }

        let translator = self.services.translator.as_ref().ok_or_else(|| {
            AuditError::service(
                "translation",
                format!("document is in '{}' but no translator is configured", language),
            )
        })?;
        tracing::info!("🔤 Translating document from '{}'", language);
        let text = translator.translate(&raw_text).await?;

        Ok(Document {
            text,
            language,
            translated: true,
        })
    }

    async fn transform(&self, document: Document) -> Result<AuditRecord> {
        let clauses = segment_clauses(&document.text);
        let scope = EvaluationScope::new(clauses.len(), self.config.max_clauses());
        if scope.is_truncated() {
            tracing::warn!(
                "⚠️ Only the first {} of {} clauses are classified; the overall risk covers those only",
                scope.evaluated_clauses,
                scope.segmented_clauses
            );
        }

        let entities = self.services.entities.extract_entities(&document.text).await?;
        let contract_type = classify_contract_type(&document.text);
        tracing::info!("📄 Contract type: {}", contract_type);

        let summary = self.summarize(&document.text).await?;

        let mut assessments = Vec::with_capacity(scope.evaluated_clauses);
        for clause in clauses.iter().take(scope.evaluated_clauses) {
            let mut assessment =
                assess_clause(clause, self.services.similarity.as_ref()).await?;
            assessment.explanation = self.explain(&clause.text).await?;
            assessments.push(assessment);
        }

        Ok(AuditRecordBuilder::new(document.language, contract_type)
            .entities(entities)
            .summary(summary)
            .assessments(assessments, scope)
            .build())
    }

    async fn load(&self, record: AuditRecord) -> Result<String> {
        let exports = self.render_exports(&record)?;
        let file = self.store.persist(&record).await?;

        for (path, data) in &exports {
            self.storage.write_file(path, data).await?;
        }
        tracing::debug!("Wrote {} export file(s) for {}", exports.len(), record.audit_id);

        let output_path = format!("{}/{}", self.config.audit_dir(), file);
        tracing::info!("📦 Audit record saved: {}", output_path);
        Ok(output_path)
    }
}
