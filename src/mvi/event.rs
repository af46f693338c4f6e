//! Base trait for events (user/lifecycle intents) in the view-state engine.

/// Marker trait for event objects.
///
/// Events represent:
/// - User actions (field edits, button presses)
/// - Lifecycle signals (screen init)
/// - Results handed back by collaborators
///
/// Each event is consumed exactly once by the engine.
pub trait Event: Send + 'static {}
