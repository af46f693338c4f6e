//! Draft scripts: builder operations recorded as JSON.
//!
//! ```json
//! [
//!   {"op": "header", "field": "title", "value": "Park cleanup"},
//!   {"op": "add", "kind": "image_gallery"},
//!   {"op": "edit", "index": 0, "sub_index": 0, "field": "image_link", "value": "https://x"}
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::content::{BlockField, BlockKind, BuilderError, ContentBuilder, HeaderField};
use crate::error::MeetupError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftCommand {
    Header {
        field: HeaderField,
        value: String,
    },
    Add {
        kind: BlockKind,
    },
    Edit {
        index: usize,
        #[serde(default)]
        sub_index: Option<usize>,
        field: BlockField,
        value: String,
    },
    Remove {
        index: usize,
    },
    AddItem {
        index: usize,
    },
    RemoveItem {
        index: usize,
        sub_index: usize,
    },
}

impl DraftCommand {
    pub fn apply(self, builder: &mut ContentBuilder) -> Result<(), BuilderError> {
        match self {
            DraftCommand::Header { field, value } => builder.edit_header(field, value),
            DraftCommand::Add { kind } => {
                builder.add_block(kind);
            }
            DraftCommand::Edit {
                index,
                sub_index,
                field,
                value,
            } => builder.edit_field(index, sub_index, field, value)?,
            DraftCommand::Remove { index } => {
                builder.remove_block(index)?;
            }
            DraftCommand::AddItem { index } => {
                builder.add_nested_item(index)?;
            }
            DraftCommand::RemoveItem { index, sub_index } => {
                builder.remove_nested_item(index, sub_index)?;
            }
        }
        Ok(())
    }
}

/// Parse a JSON script.
pub fn parse(json: &str) -> Result<Vec<DraftCommand>, MeetupError> {
    serde_json::from_str(json).map_err(|err| MeetupError::InvalidInput(err.to_string()))
}

/// Run every command in order on a fresh builder, stopping at the first
/// failing step.
pub fn run(commands: Vec<DraftCommand>) -> Result<ContentBuilder, MeetupError> {
    let mut builder = ContentBuilder::new();
    for (step, command) in commands.into_iter().enumerate() {
        command
            .apply(&mut builder)
            .map_err(|source| MeetupError::Script { step, source })?;
    }
    Ok(builder)
}
