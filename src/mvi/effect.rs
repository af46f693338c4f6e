//! One-shot effects and their fan-out.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Marker trait for effect objects.
///
/// Effects are instructions for collaborators outside the state
/// (navigation, transient overlays). They are never stored in state
/// and never replayed.
pub trait Effect: Clone + Send + 'static {}

/// Fan-out of effects to whoever is listening at emission time.
///
/// Every attached [`EffectStream`] receives its own copy. With no
/// listeners attached, emitted effects are dropped.
pub struct EffectBus<E> {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<E>>>>,
}

impl<E> Clone for EffectBus<E> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<E: Effect> EffectBus<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attach a new listener. It sees only effects emitted from now on.
    pub fn subscribe(&self) -> EffectStream<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        EffectStream { receiver: rx }
    }

    /// Deliver `effect` to every live listener, pruning closed ones.
    pub fn emit(&self, effect: E) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.send(effect.clone()).is_ok());
        if subscribers.is_empty() {
            tracing::trace!("effect dropped, no listeners attached");
        }
    }

    pub fn listener_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

impl<E: Effect> Default for EffectBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Unbounded stream of effects for a single listener.
///
/// Dropping the stream detaches the listener.
pub struct EffectStream<E> {
    receiver: mpsc::UnboundedReceiver<E>,
}

impl<E> EffectStream<E> {
    /// Wait for the next effect. Returns `None` once the engine is gone.
    pub async fn next(&mut self) -> Option<E> {
        self.receiver.recv().await
    }

    /// Take an already delivered effect without waiting.
    pub fn try_next(&mut self) -> Option<E> {
        self.receiver.try_recv().ok()
    }
}

impl<E> Stream for EffectStream<E> {
    type Item = E;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        self.receiver.poll_recv(cx)
    }
}
