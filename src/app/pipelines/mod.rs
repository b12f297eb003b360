pub mod contract_pipeline;

pub use contract_pipeline::{Collaborators, ContractPipeline};
