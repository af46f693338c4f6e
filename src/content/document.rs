use serde::{Deserialize, Serialize};

use super::block::ContentBlock;

/// Number of fixed header fields preceding the dynamic blocks when
/// positions are reported.
pub const HEADER_LEN: usize = 3;

/// The fixed fields every document starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderField {
    ImageLink,
    Title,
    Description,
}

impl HeaderField {
    /// Position of the field in validation reports.
    pub fn position(self) -> usize {
        match self {
            HeaderField::ImageLink => 0,
            HeaderField::Title => 1,
            HeaderField::Description => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub image_link: String,
    pub title: String,
    pub description: String,
}

/// A fully assembled article or meeting description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub image_link: String,
    pub title: String,
    pub description: String,
    pub blocks: Vec<ContentBlock>,
}

impl Document {
    /// Validation position of the dynamic block at `index`.
    pub fn block_position(index: usize) -> usize {
        HEADER_LEN + index
    }
}
