use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Text extraction failed: {message}")]
    ExtractionError { message: String },

    #[error("{service} service failed: {message}")]
    ServiceError { service: String, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Audit record {id} already exists")]
    DuplicateRecord { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Extraction,
    ExternalService,
    Configuration,
    Storage,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceError {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExtractionError { .. } => ErrorCategory::Extraction,
            Self::ServiceError { .. } | Self::HttpError(_) => ErrorCategory::ExternalService,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::ZipError(_) | Self::DuplicateRecord { .. } => {
                ErrorCategory::Storage
            }
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Serialization,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Extraction | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Extraction => {
                "Check that the input is a readable text document with contract content"
            }
            ErrorCategory::ExternalService => {
                "Check the model endpoint and API key, or rerun with --offline"
            }
            ErrorCategory::Configuration => "Fix the configuration value and rerun",
            ErrorCategory::Storage => "Check that the audit directory is writable",
            ErrorCategory::Serialization => "Report this audit record as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Extraction => format!("Could not read the contract: {}", self),
            ErrorCategory::ExternalService => {
                format!("An analysis service failed, no audit was saved: {}", self)
            }
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Storage => format!("Could not save the audit record: {}", self),
            ErrorCategory::Serialization => format!("Could not export the audit record: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_failures_are_retryable_severity() {
        let err = AuditError::service("similarity", "timeout");
        assert_eq!(err.category(), ErrorCategory::ExternalService);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "similarity service failed: timeout");
    }

    #[test]
    fn duplicate_record_is_a_storage_error() {
        let err = AuditError::DuplicateRecord { id: "abc".into() };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.user_friendly_message().contains("abc"));
    }
}
