//! Asynchronous transition function driven by the engine.

use std::future::Future;

use super::effect::Effect;
use super::event::Event;
use super::state::UiState;

/// Result of handling one event: the state to commit and the effects
/// to emit after the commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, E> {
    pub state: S,
    pub effects: Vec<E>,
}

impl<S, E> Transition<S, E> {
    /// Commit `state` without emitting anything.
    pub fn to(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Screen logic run by the [`Engine`](super::Engine).
///
/// `handle` receives an owned copy of the latest committed state. It may
/// await collaborators; the engine holds every later event until it
/// returns, so transitions never interleave. Independent sub-operations
/// should be joined inside `handle` and folded into a single returned
/// state.
///
/// Collaborator failures must be folded into the returned state.
pub trait ViewModel: Send + Sync + 'static {
    type Event: Event;
    type State: UiState;
    type Effect: Effect;

    fn handle(
        &self,
        event: Self::Event,
        state: Self::State,
    ) -> impl Future<Output = Transition<Self::State, Self::Effect>> + Send;
}
