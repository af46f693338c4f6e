//! Variant content builder for articles and meeting descriptions.
//!
//! A document is three fixed header fields followed by an ordered
//! sequence of typed blocks. Blocks are addressed by position.

mod block;
mod builder;
mod document;
mod error;
mod validate;

pub use block::{BlockField, BlockKind, ContentBlock, Image};
pub use builder::{ContentBuilder, NestedRemoval};
pub use document::{Document, Header, HeaderField, HEADER_LEN};
pub use error::{BuilderError, ValidationFailed};
pub use validate::{RulesValidator, ValidationError, Validator};
