use crate::domain::ports::SimilarityScorer;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Offline similarity: Sørensen–Dice over character bigrams of the
/// lowercased, whitespace-normalized texts.
#[derive(Debug, Clone, Default)]
pub struct LexicalSimilarity;

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

impl LexicalSimilarity {
    pub fn score(&self, text: &str, reference: &str) -> f64 {
        let (a, b) = (normalize(text), normalize(reference));
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        strsim::sorensen_dice(&a, &b)
    }
}

#[async_trait]
impl SimilarityScorer for LexicalSimilarity {
    async fn similarity(&self, text: &str, reference: &str) -> Result<f64> {
        Ok(self.score(text, reference))
    }
}
