pub mod aggregator;
pub mod audit;
pub mod classifier;
pub mod contract_type;
pub mod engine;
pub mod export;
pub mod rules;
pub mod segmenter;
pub mod templates;

pub use crate::domain::model::{AuditRecord, ClauseAssessment, Document};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
