use thiserror::Error;

/// Failures reported by a realtime document store.
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("No record at '{path}'")]
    NotFound { path: String },

    #[error("Realtime store unreachable while accessing '{path}'")]
    Connectivity { path: String },

    #[error("Failed to decode record at '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record for '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RealtimeError {
    /// User-friendly message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            RealtimeError::NotFound { .. } => "This item no longer exists",
            RealtimeError::Connectivity { .. } => "No connection, try again later",
            RealtimeError::Decode { .. } | RealtimeError::Encode { .. } => {
                "Something went wrong, try again later"
            }
        }
    }
}
