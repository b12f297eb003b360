// Domain layer: core models and ports (interfaces) for the contract audit.

pub mod model;
pub mod ports;
