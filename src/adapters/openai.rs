//! OpenAI-compatible HTTP collaborators: chat completions for summaries,
//! explanations and translation; embeddings for template similarity.
//!
//! Calls are made once, with no retry. A failed call is returned as
//! [`AuditError::ServiceError`] and ends processing of the document.

use crate::domain::ports::{SimilarityScorer, TextGenerator, Translator};
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSettings {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub embedding_model: String,
    /// No timeout when unset.
    pub timeout_seconds: Option<u64>,
}

fn build_client(timeout_seconds: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

async fn post_json(
    client: &Client,
    settings: &OpenAiSettings,
    service: &str,
    path: &str,
    body: serde_json::Value,
) -> Result<serde_json::Value> {
    let url = format!("{}/{}", settings.endpoint.trim_end_matches('/'), path);
    tracing::debug!("POST {} ({})", url, service);

    let response = client
        .post(&url)
        .bearer_auth(&settings.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| AuditError::service(service, format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AuditError::service(
            service,
            format!("API error {}: {}", status, error_text),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| AuditError::service(service, format!("malformed response: {}", e)))
}

#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    settings: OpenAiSettings,
}

impl ChatCompletionClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.timeout_seconds)?,
            settings,
        })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let body = json!({
            "model": self.settings.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": temperature,
        });

        let response = post_json(
            &self.client,
            &self.settings,
            "text generation",
            "chat/completions",
            body,
        )
        .await?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AuditError::service("text generation", "response has no message content"))
    }
}

/// Translates through a text generator at temperature 0.
#[derive(Clone)]
pub struct LlmTranslator {
    generator: Arc<dyn TextGenerator>,
}

impl LlmTranslator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let prompt = format!("Translate this legal document into English:\n{}", text);
        self.generator.generate(&prompt, 0.0).await
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingSimilarity {
    client: Client,
    settings: OpenAiSettings,
}

impl EmbeddingSimilarity {
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings.timeout_seconds)?,
            settings,
        })
    }
}

fn embedding_at(response: &serde_json::Value, index: usize) -> Result<Vec<f32>> {
    response["data"][index]["embedding"]
        .as_array()
        .ok_or_else(|| AuditError::service("similarity", format!("missing embedding {}", index)))?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| AuditError::service("similarity", "non-numeric embedding value"))
        })
        .collect()
}

/// Cosine similarity, clamped to [0, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    f64::from(dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[async_trait]
impl SimilarityScorer for EmbeddingSimilarity {
    async fn similarity(&self, text: &str, reference: &str) -> Result<f64> {
        let body = json!({
            "model": self.settings.embedding_model,
            "input": [text, reference],
        });

        let response = post_json(&self.client, &self.settings, "similarity", "embeddings", body).await?;
        let a = embedding_at(&response, 0)?;
        let b = embedding_at(&response, 1)?;
        if a.len() != b.len() {
            return Err(AuditError::service("similarity", "embedding dimensions differ"));
        }
        Ok(cosine_similarity(&a, &b))
    }
}
