use thiserror::Error;

use super::block::{BlockField, BlockKind};
use super::validate::ValidationError;

/// Positional addressing failures.
///
/// These indicate a caller holding a stale index, not a recoverable
/// runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("block index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("nested index {sub_index} out of range in block {index} (len {len})")]
    NestedIndexOutOfRange {
        index: usize,
        sub_index: usize,
        len: usize,
    },

    #[error("field {field:?} does not apply to {kind:?} block at {index}")]
    FieldMismatch {
        index: usize,
        kind: BlockKind,
        field: BlockField,
    },

    #[error("field {field:?} of block {index} needs a nested index")]
    MissingSubIndex { index: usize, field: BlockField },

    #[error("{kind:?} block at {index} has no nested items")]
    NotNested { index: usize, kind: BlockKind },
}

/// A built document failed business rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document failed validation: {}", .errors.first().map(|e| e.message.as_str()).unwrap_or("no details"))]
pub struct ValidationFailed {
    /// Sorted by position.
    errors: Vec<ValidationError>,
}

impl ValidationFailed {
    /// Returns `None` when `errors` is empty.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        errors.sort_by_key(|e| e.position);
        Some(Self { errors })
    }

    /// The error to show the user: the one at the lowest position.
    pub fn primary(&self) -> &ValidationError {
        &self.errors[0]
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
