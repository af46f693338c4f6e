use serde::{Deserialize, Serialize};

/// Block variants a user can append to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    SubTitle,
    Paragraph,
    Quote,
    ImageGallery,
    OrderedList,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::SubTitle,
        BlockKind::Paragraph,
        BlockKind::Quote,
        BlockKind::ImageGallery,
        BlockKind::OrderedList,
    ];

    /// Label shown in the "add block" picker.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::SubTitle => "Subtitle",
            BlockKind::Paragraph => "Text",
            BlockKind::Quote => "Quote",
            BlockKind::ImageGallery => "Image",
            BlockKind::OrderedList => "Ordered list",
        }
    }
}

/// Field selector for [`ContentBuilder::edit_field`](super::ContentBuilder::edit_field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockField {
    /// Text of a subtitle, paragraph or quote.
    Text,
    ImageLink,
    ImageDescription,
    ListTitle,
    ListStep,
}

impl BlockField {
    /// Whether the selector addresses an element of a nested collection.
    pub fn is_nested(self) -> bool {
        matches!(
            self,
            BlockField::ImageLink | BlockField::ImageDescription | BlockField::ListStep
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub link: String,
    pub description: String,
}

/// One unit of a composed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    SubTitle { text: String },
    Paragraph { text: String },
    Quote { text: String },
    ImageGallery { images: Vec<Image> },
    OrderedList { title: String, steps: Vec<String> },
}

impl ContentBlock {
    /// Empty block of `kind`. Galleries and lists start with one empty
    /// nested item so that sub-index 0 is immediately editable.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::SubTitle => ContentBlock::SubTitle {
                text: String::new(),
            },
            BlockKind::Paragraph => ContentBlock::Paragraph {
                text: String::new(),
            },
            BlockKind::Quote => ContentBlock::Quote {
                text: String::new(),
            },
            BlockKind::ImageGallery => ContentBlock::ImageGallery {
                images: vec![Image::default()],
            },
            BlockKind::OrderedList => ContentBlock::OrderedList {
                title: String::new(),
                steps: vec![String::new()],
            },
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::SubTitle { .. } => BlockKind::SubTitle,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Quote { .. } => BlockKind::Quote,
            ContentBlock::ImageGallery { .. } => BlockKind::ImageGallery,
            ContentBlock::OrderedList { .. } => BlockKind::OrderedList,
        }
    }

    /// Length of the nested collection, if the block has one.
    pub fn nested_len(&self) -> Option<usize> {
        match self {
            ContentBlock::ImageGallery { images } => Some(images.len()),
            ContentBlock::OrderedList { steps, .. } => Some(steps.len()),
            _ => None,
        }
    }
}
