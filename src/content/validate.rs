//! Business rules a built document must satisfy before publishing.

use serde::{Deserialize, Serialize};

use super::block::ContentBlock;
use super::document::{Document, HeaderField};
use super::error::ValidationFailed;
use crate::config::ValidationConfig;

/// One rule violation, tagged with the position of the offending field
/// (header fields first, then dynamic blocks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub position: usize,
    pub message: String,
}

impl ValidationError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Validation collaborator.
pub trait Validator: Send + Sync {
    fn validate(&self, document: &Document) -> Vec<ValidationError>;

    /// Validate and bundle violations into an error.
    fn check(&self, document: &Document) -> Result<(), ValidationFailed> {
        match ValidationFailed::from_errors(self.validate(document)) {
            Some(failed) => Err(failed),
            None => Ok(()),
        }
    }
}

/// Rule set driven by the `[validation]` config section.
#[derive(Debug, Clone)]
pub struct RulesValidator {
    config: ValidationConfig,
}

impl RulesValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }
}

impl Default for RulesValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Validator for RulesValidator {
    fn validate(&self, document: &Document) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let image = HeaderField::ImageLink.position();
        if document.image_link.trim().is_empty() {
            errors.push(ValidationError::new(image, "Add a cover image link"));
        } else if !is_http_link(&document.image_link) {
            errors.push(ValidationError::new(
                image,
                "Cover image link must start with http:// or https://",
            ));
        }

        let title = HeaderField::Title.position();
        let title_chars = document.title.trim().chars().count();
        if title_chars < self.config.title_min_chars {
            errors.push(ValidationError::new(
                title,
                format!(
                    "Title must be at least {} characters",
                    self.config.title_min_chars
                ),
            ));
        } else if title_chars > self.config.title_max_chars {
            errors.push(ValidationError::new(
                title,
                format!(
                    "Title must be at most {} characters",
                    self.config.title_max_chars
                ),
            ));
        }

        let description = HeaderField::Description.position();
        if document.description.trim().is_empty() {
            errors.push(ValidationError::new(description, "Add a description"));
        } else if document.description.chars().count() > self.config.description_max_chars {
            errors.push(ValidationError::new(
                description,
                format!(
                    "Description must be at most {} characters",
                    self.config.description_max_chars
                ),
            ));
        }

        if document.blocks.len() > self.config.max_blocks {
            errors.push(ValidationError::new(
                Document::block_position(self.config.max_blocks),
                format!("At most {} blocks are allowed", self.config.max_blocks),
            ));
        }

        for (index, block) in document.blocks.iter().enumerate() {
            if let Some(message) = block_problem(block) {
                errors.push(ValidationError::new(Document::block_position(index), message));
            }
        }

        errors
    }
}

fn is_http_link(link: &str) -> bool {
    let link = link.trim();
    link.starts_with("http://") || link.starts_with("https://")
}

fn block_problem(block: &ContentBlock) -> Option<&'static str> {
    match block {
        ContentBlock::SubTitle { text } if text.trim().is_empty() => Some("Subtitle is empty"),
        ContentBlock::Paragraph { text } if text.trim().is_empty() => Some("Text is empty"),
        ContentBlock::Quote { text } if text.trim().is_empty() => Some("Quote is empty"),
        ContentBlock::ImageGallery { images } => {
            if images.iter().any(|image| !is_http_link(&image.link)) {
                Some("Every image needs an http(s) link")
            } else {
                None
            }
        }
        ContentBlock::OrderedList { title, steps } => {
            if title.trim().is_empty() {
                Some("List title is empty")
            } else if steps.iter().any(|step| step.trim().is_empty()) {
                Some("List has an empty step")
            } else {
                None
            }
        }
        _ => None,
    }
}
