//! Pattern-based entity extraction.
//!
//! A lightweight stand-in for a trained NER model: company suffixes and
//! honorifics for parties, common date layouts, currency-marked amounts and a
//! gazetteer of Indian places. Spans are returned in text order and are not
//! deduplicated.

use crate::domain::model::EntityBundle;
use crate::domain::ports::EntityExtractor;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec";

static PARTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(?:Mr|Mrs|Ms|Dr|Shri|Smt)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*
        |
        \b(?:[A-Z][\w&]*\s+){1,5}(?:Pvt\.?\s+Ltd|Private\s+Limited|Limited|Ltd|LLP|Inc|LLC|Corporation|Corp)\b\.?
        ",
    )
    .expect("party pattern")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{m})\.?,?\s+\d{{4}}\b|\b(?:{m})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b|\b\d{{1,2}}[/.-]\d{{1,2}}[/.-]\d{{2,4}}\b",
        m = MONTHS
    ))
    .expect("date pattern")
});

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:₹|\$|€|£|\bRs\.?|\bINR|\bUSD)\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:lakhs?|crores?|million|thousand)\b)?|\b\d[\d,]*(?:\.\d+)?\s?(?:rupees|dollars)\b",
    )
    .expect("amount pattern")
});

const PLACES: &[&str] = &[
    "New Delhi",
    "Delhi",
    "Mumbai",
    "Bengaluru",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Noida",
    "Gurugram",
    "Gurgaon",
    "Maharashtra",
    "Karnataka",
    "Tamil Nadu",
    "Gujarat",
    "Rajasthan",
    "Uttar Pradesh",
    "West Bengal",
    "Telangana",
    "Kerala",
    "India",
];

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", PLACES.join("|"))).expect("location pattern")
});

fn spans(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct PatternEntityExtractor;

impl PatternEntityExtractor {
    pub fn extract(&self, text: &str) -> EntityBundle {
        EntityBundle {
            parties: spans(&PARTY, text),
            dates: spans(&DATE, text),
            amounts: spans(&AMOUNT, text),
            locations: spans(&LOCATION, text),
        }
    }
}

#[async_trait]
impl EntityExtractor for PatternEntityExtractor {
    async fn extract_entities(&self, text: &str) -> Result<EntityBundle> {
        let entities = self.extract(text);
        tracing::debug!(
            "Entities: {} parties, {} dates, {} amounts, {} locations",
            entities.parties.len(),
            entities.dates.len(),
            entities.amounts.len(),
            entities.locations.len()
        );
        Ok(entities)
    }
}
