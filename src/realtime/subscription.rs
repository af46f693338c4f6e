use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use scopeguard::ScopeGuard;
use serde_json::Value;
use tokio::sync::mpsc;

type Release = Box<dyn FnOnce(()) + Send>;

/// A live listener on one path.
///
/// Holds the value observed when the listener was attached and yields
/// every later change. The listener is removed from the store when the
/// subscription is dropped, on every exit path.
pub struct Subscription {
    path: String,
    initial: Value,
    changes: mpsc::UnboundedReceiver<Value>,
    _release: ScopeGuard<(), Release>,
}

impl Subscription {
    /// Build a subscription; `release` runs exactly once when it is dropped.
    pub fn new(
        path: impl Into<String>,
        initial: Value,
        changes: mpsc::UnboundedReceiver<Value>,
        release: impl FnOnce() + Send + 'static,
    ) -> Self {
        let release: Release = Box::new(move |()| release());
        Self {
            path: path.into(),
            initial,
            changes,
            _release: scopeguard::guard((), release),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value at attach time (`Value::Null` when absent).
    pub fn initial(&self) -> &Value {
        &self.initial
    }

    /// Wait for the next change. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Value> {
        self.changes.recv().await
    }
}

impl Stream for Subscription {
    type Item = Value;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Value>> {
        self.changes.poll_recv(cx)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
