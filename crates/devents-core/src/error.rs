//! Shared error type across devents crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, DeventsError>;

/// Unified error type used by core and the aggregator.
#[derive(Debug, Error)]
pub enum DeventsError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("metric registration failed: {0}")]
    Registration(String),
    #[error("metrics server failed: {0}")]
    Server(String),
    #[error("event source failed: {0}")]
    Source(String),
    #[error("internal: {0}")]
    Internal(String),
}
