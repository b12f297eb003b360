#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{AuditConfig, SimilarityBackend};

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};

/// Effective settings for one run: the file config plus the input document.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_path: String,
    pub config: AuditConfig,
}

impl Settings {
    pub fn new(input_path: impl Into<String>, config: AuditConfig) -> Self {
        Self {
            input_path: input_path.into(),
            config,
        }
    }

    /// Load the optional config file and apply command-line overrides.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => AuditConfig::from_file(path)?,
            None => AuditConfig::default(),
        };

        if let Some(dir) = &cli.output_dir {
            config.output.audit_dir = dir.clone();
        }
        if let Some(max) = cli.max_clauses {
            config.analysis.max_clauses = max;
        }
        if let Some(formats) = &cli.formats {
            config.output.formats = formats.clone();
        }
        if cli.bundle {
            config.output.bundle = true;
        }
        if cli.no_explain {
            config.llm.explain_clauses = false;
        }
        if cli.offline {
            config.go_offline();
        }

        Ok(Self::new(cli.input.clone(), config))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        self.config.validate()
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn audit_dir(&self) -> &str {
        &self.config.output.audit_dir
    }

    fn max_clauses(&self) -> usize {
        self.config.analysis.max_clauses
    }

    fn source_language(&self) -> &str {
        &self.config.analysis.source_language
    }

    fn export_formats(&self) -> &[String] {
        &self.config.output.formats
    }

    fn bundle_exports(&self) -> bool {
        self.config.output.bundle
    }

    fn summarize(&self) -> bool {
        self.config.llm.enabled && self.config.llm.summarize
    }

    fn explain_clauses(&self) -> bool {
        self.config.llm.enabled && self.config.llm.explain_clauses
    }

    fn summary_char_limit(&self) -> usize {
        self.config.llm.summary_char_limit
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_overrides_file_defaults() {
        let cli = CliConfig::parse_from([
            "clause-audit",
            "lease.txt",
            "--output-dir",
            "/tmp/audits",
            "--max-clauses",
            "3",
            "--bundle",
            "--offline",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.input_path(), "lease.txt");
        assert_eq!(settings.audit_dir(), "/tmp/audits");
        assert_eq!(settings.max_clauses(), 3);
        assert!(settings.bundle_exports());
        assert!(!settings.summarize());
        assert!(!settings.explain_clauses());
        assert!(settings.validate().is_ok());
    }
}
