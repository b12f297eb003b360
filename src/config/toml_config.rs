use crate::core::export::SUPPORTED_FORMATS;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number,
    validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

pub const DEFAULT_MAX_CLAUSES: usize = 12;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Only the first `max_clauses` clauses are classified.
    pub max_clauses: usize,
    /// Documents detected in this language are translated before analysis.
    pub source_language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_clauses: DEFAULT_MAX_CLAUSES,
            source_language: "hi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: Option<u64>,
    pub summarize: bool,
    pub explain_clauses: bool,
    pub summary_char_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4".to_string(),
            timeout_seconds: None,
            summarize: true,
            explain_clauses: true,
            summary_char_limit: 4000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    #[default]
    Lexical,
    Embedding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub backend: SimilarityBackend,
    pub embedding_model: String,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            backend: SimilarityBackend::Lexical,
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub audit_dir: String,
    pub formats: Vec<String>,
    /// Zip the export formats into one download.
    pub bundle: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            audit_dir: "audit_logs".to_string(),
            formats: vec!["json".to_string()],
            bundle: false,
        }
    }
}

impl AuditConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML after replacing `${VAR}` with environment values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unset variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Disable every network-backed collaborator.
    pub fn go_offline(&mut self) {
        self.llm.enabled = false;
        self.similarity.backend = SimilarityBackend::Lexical;
    }

    pub fn needs_api(&self) -> bool {
        self.llm.enabled || self.similarity.backend == SimilarityBackend::Embedding
    }

    pub fn api_key(&self) -> Result<&str> {
        let key = validate_required_field("llm.api_key", &self.llm.api_key)?;
        if key.starts_with("${") {
            return Err(AuditError::MissingConfigError {
                field: format!("llm.api_key (environment variable {} is not set)", key),
            });
        }
        Ok(key.as_str())
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("analysis.max_clauses", self.analysis.max_clauses, 1)?;
        validate_non_empty_string("analysis.source_language", &self.analysis.source_language)?;
        validate_path("output.audit_dir", &self.output.audit_dir)?;
        validate_one_of("output.formats", &self.output.formats, SUPPORTED_FORMATS)?;

        if self.needs_api() {
            validate_url("llm.endpoint", &self.llm.endpoint)?;
            validate_non_empty_string("llm.model", &self.llm.model)?;
            self.api_key()?;
        }
        if self.llm.enabled && self.llm.summarize {
            validate_positive_number("llm.summary_char_limit", self.llm.summary_char_limit, 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AuditConfig::from_toml_str("").unwrap();

        assert_eq!(config.analysis.max_clauses, 12);
        assert_eq!(config.analysis.source_language, "hi");
        assert!(!config.llm.enabled);
        assert_eq!(config.similarity.backend, SimilarityBackend::Lexical);
        assert_eq!(config.output.formats, vec!["json"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_content = r#"
[analysis]
max_clauses = 5

[llm]
enabled = true
endpoint = "http://localhost:11434/v1"
api_key = "sk-test"
model = "llama3"
explain_clauses = false

[similarity]
backend = "embedding"

[output]
audit_dir = "./audits"
formats = ["json", "csv"]
bundle = true
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.analysis.max_clauses, 5);
        assert_eq!(config.llm.model, "llama3");
        assert!(!config.llm.explain_clauses);
        assert!(config.llm.summarize);
        assert_eq!(config.similarity.backend, SimilarityBackend::Embedding);
        assert!(config.output.bundle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CLAUSE_AUDIT_TEST_KEY", "sk-from-env");

        let toml_content = r#"
[llm]
enabled = true
api_key = "${CLAUSE_AUDIT_TEST_KEY}"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key().unwrap(), "sk-from-env");

        std::env::remove_var("CLAUSE_AUDIT_TEST_KEY");
    }

    #[test]
    fn unset_api_key_variable_fails_validation() {
        let toml_content = r#"
[llm]
enabled = true
api_key = "${CLAUSE_AUDIT_SURELY_UNSET_VAR}"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AuditError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let config = AuditConfig::from_toml_str("[analysis]\nmax_clauses = 0").unwrap();
        assert!(config.validate().is_err());

        let config = AuditConfig::from_toml_str("[output]\nformats = [\"pdf\"]").unwrap();
        assert!(config.validate().is_err());

        let config =
            AuditConfig::from_toml_str("[llm]\nenabled = true\napi_key = \"k\"\nendpoint = \"nope\"")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn go_offline_disables_network_collaborators() {
        let mut config = AuditConfig::from_toml_str(
            "[llm]\nenabled = true\n[similarity]\nbackend = \"embedding\"",
        )
        .unwrap();
        assert!(config.needs_api());

        config.go_offline();
        assert!(!config.needs_api());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\naudit_dir = \"./from-file\"\n")
            .unwrap();

        let config = AuditConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.audit_dir, "./from-file");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            AuditConfig::from_toml_str("[analysis\nmax_clauses = "),
            Err(AuditError::ConfigValidationError { .. })
        ));
    }
}
