//! Article editor: header fields plus dynamic content blocks.

use std::sync::Arc;

use crate::content::{
    BlockField, BlockKind, BuilderError, ContentBuilder, Document, HeaderField, NestedRemoval,
    ValidationError, Validator,
};
use crate::meeting::{DirectoryRepository, User};
use crate::mvi::{Effect, Event, Transition, UiState, ViewModel};
use crate::realtime::RealtimeDatabase;

#[derive(Debug, Clone, PartialEq)]
pub enum ArticleEvent {
    Init,
    NavigateBack,
    AddBlock(BlockKind),
    RemoveBlock {
        index: usize,
    },
    HeaderChanged {
        field: HeaderField,
        value: String,
    },
    FieldChanged {
        index: usize,
        sub_index: Option<usize>,
        field: BlockField,
        value: String,
    },
    AddNestedItem {
        index: usize,
    },
    RemoveNestedItem {
        index: usize,
        sub_index: usize,
    },
    /// Build, validate and open the preview.
    Publish,
}

impl Event for ArticleEvent {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleState {
    pub author: Option<User>,
    pub builder: ContentBuilder,
    /// Every violation from the last publish attempt, for highlighting.
    pub errors: Vec<ValidationError>,
    pub error: Option<String>,
}

impl UiState for ArticleState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ArticleEffect {
    ItemAdded { index: usize },
    NavigateBack,
    NavigateToPreview(Document),
    ShowError(String),
}

impl Effect for ArticleEffect {}

pub struct ArticleViewModel<D> {
    directory: DirectoryRepository<D>,
    user_id: String,
    validator: Arc<dyn Validator>,
}

impl<D: RealtimeDatabase> ArticleViewModel<D> {
    pub fn new(
        directory: DirectoryRepository<D>,
        user_id: impl Into<String>,
        validator: Arc<dyn Validator>,
    ) -> Self {
        Self {
            directory,
            user_id: user_id.into(),
            validator,
        }
    }

    async fn init(&self, mut state: ArticleState) -> ArticleState {
        match self.directory.user(&self.user_id).await {
            Ok(user) => {
                state.author = Some(user);
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "failed to load author");
                state.error = Some(err.user_message().to_string());
            }
        }
        state
    }

    fn publish(&self, mut state: ArticleState) -> Transition<ArticleState, ArticleEffect> {
        let document = state.builder.build();
        match self.validator.check(&document) {
            Ok(()) => {
                state.errors.clear();
                Transition::to(state).with_effect(ArticleEffect::NavigateToPreview(document))
            }
            Err(failed) => {
                let message = failed.primary().message.clone();
                tracing::debug!(errors = failed.errors().len(), "article failed validation");
                state.errors = failed.into_errors();
                Transition::to(state).with_effect(ArticleEffect::ShowError(message))
            }
        }
    }
}

/// Apply a positional edit; a stale index leaves the state unchanged.
fn apply_edit<T>(
    mut state: ArticleState,
    edit: impl FnOnce(&mut ContentBuilder) -> Result<T, BuilderError>,
) -> ArticleState {
    // Builder operations validate before mutating, so a failed edit is a no-op.
    if let Err(err) = edit(&mut state.builder) {
        tracing::error!(error = %err, "edit addressed a stale index, ignored");
    }
    state
}

impl<D: RealtimeDatabase> ViewModel for ArticleViewModel<D> {
    type Event = ArticleEvent;
    type State = ArticleState;
    type Effect = ArticleEffect;

    async fn handle(
        &self,
        event: ArticleEvent,
        mut state: ArticleState,
    ) -> Transition<ArticleState, ArticleEffect> {
        match event {
            ArticleEvent::Init => Transition::to(self.init(state).await),
            ArticleEvent::NavigateBack => Transition::to(state).with_effect(ArticleEffect::NavigateBack),
            ArticleEvent::AddBlock(kind) => {
                let index = state.builder.add_block(kind);
                Transition::to(state).with_effect(ArticleEffect::ItemAdded { index })
            }
            ArticleEvent::RemoveBlock { index } => {
                Transition::to(apply_edit(state, |builder| builder.remove_block(index)))
            }
            ArticleEvent::HeaderChanged { field, value } => {
                state.builder.edit_header(field, value);
                Transition::to(state)
            }
            ArticleEvent::FieldChanged {
                index,
                sub_index,
                field,
                value,
            } => Transition::to(apply_edit(state, |builder| {
                builder.edit_field(index, sub_index, field, value)
            })),
            ArticleEvent::AddNestedItem { index } => {
                Transition::to(apply_edit(state, |builder| builder.add_nested_item(index)))
            }
            ArticleEvent::RemoveNestedItem { index, sub_index } => {
                Transition::to(apply_edit(state, |builder| {
                    let removal = builder.remove_nested_item(index, sub_index)?;
                    if removal == NestedRemoval::BlockCollapsed {
                        tracing::debug!(index, "empty block removed");
                    }
                    Ok(removal)
                }))
            }
            ArticleEvent::Publish => self.publish(state),
        }
    }
}
