//! Error taxonomy for the extraction pipeline
//!
//! Each pipeline stage wraps whatever goes wrong into its own variant with
//! a human-readable cause. Domain errors from lower stages pass through
//! unchanged; nothing is retried.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("document loading error: {0}")]
    Loading(String),

    #[error("table processing error: {0}")]
    Processing(String),

    #[error("export error: {0}")]
    Export(String),
}
