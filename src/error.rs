use thiserror::Error;

use crate::config::ConfigError;
use crate::content::{BuilderError, ValidationFailed};
use crate::realtime::RealtimeError;

/// Top-level error for operations that cross module boundaries.
#[derive(Debug, Error)]
pub enum MeetupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Realtime store failures
    #[error("Realtime error: {0}")]
    Realtime(#[from] RealtimeError),

    /// Stale or invalid positional address
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),

    /// Document fails business rules
    #[error(transparent)]
    Validation(#[from] ValidationFailed),

    /// A draft script step addressed a block that does not exist
    #[error("Draft step {step} failed: {source}")]
    Script {
        step: usize,
        #[source]
        source: BuilderError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
