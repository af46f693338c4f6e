//! Reducer trait for synchronous transitions.

use super::event::Event;
use super::state::UiState;

/// Reducer transforms state based on events.
///
/// Used by screens whose transitions never wait on a collaborator.
/// It must be a pure function: (State, Event) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The event type this reducer handles.
    type Event: Event;

    /// Process an event and return the new state.
    fn reduce(state: Self::State, event: Self::Event) -> Self::State;
}
