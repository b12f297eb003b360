pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{AuditConfig, Settings};

pub use crate::adapters::storage::{FileAuditStore, LocalStorage};
pub use crate::app::pipelines::{Collaborators, ContractPipeline};
pub use crate::core::engine::{AuditEngine, AuditOutcome};
pub use crate::core::segmenter::segment_clauses;
pub use crate::domain::model::{AuditRecord, ClauseAssessment, RiskLevel};
pub use crate::utils::error::{AuditError, Result};
