pub mod config_schema;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod scoring;
pub mod types;

pub use types::*;
