//! Positional editing of a heterogeneous block sequence.
//!
//! The sequence lives behind an `Arc` and is updated copy-on-write: a
//! [`ContentBuilder::snapshot`] taken before an edit keeps observing the
//! old blocks. Indices are positions, so removing a block shifts every
//! later index down by one; an index is only meaningful until the next
//! removal.

use std::sync::Arc;

use super::block::{BlockField, BlockKind, ContentBlock, Image};
use super::document::{Document, Header, HeaderField};
use super::error::BuilderError;

/// Outcome of [`ContentBuilder::remove_nested_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedRemoval {
    ItemRemoved,
    /// The nested collection became empty and the whole block was removed.
    BlockCollapsed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuilder {
    header: Header,
    blocks: Arc<Vec<ContentBlock>>,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&ContentBlock> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Shared view of the current sequence, unaffected by later edits.
    pub fn snapshot(&self) -> Arc<Vec<ContentBlock>> {
        Arc::clone(&self.blocks)
    }

    pub fn edit_header(&mut self, field: HeaderField, value: impl Into<String>) {
        let value = value.into();
        match field {
            HeaderField::ImageLink => self.header.image_link = value,
            HeaderField::Title => self.header.title = value,
            HeaderField::Description => self.header.description = value,
        }
    }

    /// Append an empty block of `kind` and return its index.
    pub fn add_block(&mut self, kind: BlockKind) -> usize {
        let blocks = Arc::make_mut(&mut self.blocks);
        blocks.push(ContentBlock::empty(kind));
        blocks.len() - 1
    }

    /// Replace one field of the block at `index`.
    ///
    /// `sub_index` addresses the image or step for nested selectors and is
    /// ignored otherwise.
    pub fn edit_field(
        &mut self,
        index: usize,
        sub_index: Option<usize>,
        field: BlockField,
        value: impl Into<String>,
    ) -> Result<(), BuilderError> {
        let current = self.checked(index)?;
        let updated = with_field(current, index, sub_index, field, value.into())?;
        Arc::make_mut(&mut self.blocks)[index] = updated;
        Ok(())
    }

    /// Remove the block at `index`; later blocks shift down by one.
    pub fn remove_block(&mut self, index: usize) -> Result<ContentBlock, BuilderError> {
        self.checked(index)?;
        Ok(Arc::make_mut(&mut self.blocks).remove(index))
    }

    /// Append an empty image or step and return its nested index.
    pub fn add_nested_item(&mut self, index: usize) -> Result<usize, BuilderError> {
        let mut updated = self.checked(index)?.clone();
        let sub_index = match &mut updated {
            ContentBlock::ImageGallery { images } => {
                images.push(Image::default());
                images.len() - 1
            }
            ContentBlock::OrderedList { steps, .. } => {
                steps.push(String::new());
                steps.len() - 1
            }
            other => {
                return Err(BuilderError::NotNested {
                    index,
                    kind: other.kind(),
                })
            }
        };
        Arc::make_mut(&mut self.blocks)[index] = updated;
        Ok(sub_index)
    }

    /// Remove one image or step. Removing the last one removes the whole
    /// block, so every later block index shifts down by one.
    pub fn remove_nested_item(
        &mut self,
        index: usize,
        sub_index: usize,
    ) -> Result<NestedRemoval, BuilderError> {
        let mut updated = self.checked(index)?.clone();
        let remaining = match &mut updated {
            ContentBlock::ImageGallery { images } => {
                check_nested(index, sub_index, images.len())?;
                images.remove(sub_index);
                images.len()
            }
            ContentBlock::OrderedList { steps, .. } => {
                check_nested(index, sub_index, steps.len())?;
                steps.remove(sub_index);
                steps.len()
            }
            other => {
                return Err(BuilderError::NotNested {
                    index,
                    kind: other.kind(),
                })
            }
        };

        let blocks = Arc::make_mut(&mut self.blocks);
        if remaining == 0 {
            blocks.remove(index);
            tracing::debug!(index, "last nested item removed, block collapsed");
            Ok(NestedRemoval::BlockCollapsed)
        } else {
            blocks[index] = updated;
            Ok(NestedRemoval::ItemRemoved)
        }
    }

    /// Assemble header and blocks into a document.
    pub fn build(&self) -> Document {
        Document {
            image_link: self.header.image_link.clone(),
            title: self.header.title.clone(),
            description: self.header.description.clone(),
            blocks: self.blocks.as_ref().clone(),
        }
    }

    fn checked(&self, index: usize) -> Result<&ContentBlock, BuilderError> {
        self.blocks.get(index).ok_or(BuilderError::IndexOutOfRange {
            index,
            len: self.blocks.len(),
        })
    }
}

impl From<Document> for ContentBuilder {
    fn from(document: Document) -> Self {
        Self {
            header: Header {
                image_link: document.image_link,
                title: document.title,
                description: document.description,
            },
            blocks: Arc::new(document.blocks),
        }
    }
}

fn check_nested(index: usize, sub_index: usize, len: usize) -> Result<(), BuilderError> {
    if sub_index < len {
        Ok(())
    } else {
        Err(BuilderError::NestedIndexOutOfRange {
            index,
            sub_index,
            len,
        })
    }
}

fn with_field(
    block: &ContentBlock,
    index: usize,
    sub_index: Option<usize>,
    field: BlockField,
    value: String,
) -> Result<ContentBlock, BuilderError> {
    let nested = |len: usize| -> Result<usize, BuilderError> {
        let sub_index = sub_index.ok_or(BuilderError::MissingSubIndex { index, field })?;
        check_nested(index, sub_index, len)?;
        Ok(sub_index)
    };

    let mut block = block.clone();
    match (&mut block, field) {
        (
            ContentBlock::SubTitle { text }
            | ContentBlock::Paragraph { text }
            | ContentBlock::Quote { text },
            BlockField::Text,
        ) => *text = value,
        (ContentBlock::ImageGallery { images }, BlockField::ImageLink) => {
            let sub_index = nested(images.len())?;
            images[sub_index].link = value;
        }
        (ContentBlock::ImageGallery { images }, BlockField::ImageDescription) => {
            let sub_index = nested(images.len())?;
            images[sub_index].description = value;
        }
        (ContentBlock::OrderedList { title, .. }, BlockField::ListTitle) => *title = value,
        (ContentBlock::OrderedList { steps, .. }, BlockField::ListStep) => {
            let sub_index = nested(steps.len())?;
            steps[sub_index] = value;
        }
        (other, field) => {
            return Err(BuilderError::FieldMismatch {
                index,
                kind: other.kind(),
                field,
            })
        }
    }
    Ok(block)
}
