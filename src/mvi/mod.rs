//! Unidirectional view-state primitives.
//!
//! # Architecture
//!
//! ```text
//! Event ──→ Engine ──→ ViewModel::handle ──→ State (committed, latest only)
//!   ↑                        │
//!   │                        └──→ Effect (one-shot, not replayed)
//!   └────────── screen ──────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of everything a screen renders
//! - **Event**: User actions or lifecycle signals
//! - **Effect**: One-shot instructions for collaborators outside the state
//! - **Reducer**: Pure synchronous transition, for screens that never wait
//! - **ViewModel**: Asynchronous transition run by the engine's serialized loop

mod effect;
mod engine;
mod event;
mod reducer;
mod state;
mod view_model;

pub use effect::{Effect, EffectBus, EffectStream};
pub use engine::{Engine, EngineHandle};
pub use event::Event;
pub use reducer::Reducer;
pub use state::UiState;
pub use view_model::{Transition, ViewModel};
