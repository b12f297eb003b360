use crate::domain::ports::{LanguageDetector, TextExtractor};
use crate::utils::error::{AuditError, Result};

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Reads UTF-8 text documents. Form feeds (page breaks) become newlines so
/// pages stay concatenated in source order.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| AuditError::extraction(format!("input is not UTF-8 text: {}", e)))?;

        if text.contains('\0') {
            return Err(AuditError::extraction("input looks like a binary file"));
        }

        let text = text.trim_start_matches('\u{feff}').replace('\u{c}', "\n");
        if text.trim().is_empty() {
            return Err(AuditError::extraction("no text could be recovered"));
        }

        Ok(text)
    }
}

/// Guesses the language from the dominant script of alphabetic characters.
#[derive(Debug, Clone, Default)]
pub struct ScriptLanguageDetector;

impl LanguageDetector for ScriptLanguageDetector {
    fn detect(&self, text: &str) -> String {
        let (mut latin, mut devanagari, mut other) = (0usize, 0usize, 0usize);

        for c in text.chars().filter(|c| c.is_alphabetic()) {
            match c {
                'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' => latin += 1,
                '\u{0900}'..='\u{097F}' => devanagari += 1,
                _ => other += 1,
            }
        }

        let total = latin + devanagari + other;
        let language = if total == 0 {
            UNKNOWN_LANGUAGE
        } else if devanagari * 2 > total {
            "hi"
        } else if latin * 2 > total {
            "en"
        } else {
            UNKNOWN_LANGUAGE
        };

        if language == UNKNOWN_LANGUAGE {
            tracing::warn!("Could not detect document language, defaulting to unknown");
        }
        language.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_utf8_and_splits_pages() {
        let text = PlainTextExtractor
            .extract_text("1. First page\u{c}2. Second page".as_bytes())
            .unwrap();
        assert_eq!(text, "1. First page\n2. Second page");
    }

    #[test]
    fn rejects_binary_and_empty_input() {
        assert!(matches!(
            PlainTextExtractor.extract_text(&[0x25, 0x50, 0x44, 0x46, 0x00, 0xff]),
            Err(AuditError::ExtractionError { .. })
        ));
        assert!(PlainTextExtractor.extract_text(b" \n\t ").is_err());
    }

    #[test]
    fn detects_dominant_script() {
        let detector = ScriptLanguageDetector;
        assert_eq!(detector.detect("The employee shall not compete."), "en");
        assert_eq!(detector.detect("कर्मचारी प्रतिस्पर्धा नहीं करेगा"), "hi");
        assert_eq!(detector.detect("12345 ---"), UNKNOWN_LANGUAGE);
        assert_eq!(detector.detect("契約書の条項"), UNKNOWN_LANGUAGE);
    }
}
