use std::future::Future;

use serde_json::Value;

use super::error::RealtimeError;
use super::subscription::Subscription;

/// Capability of a realtime document store.
///
/// Paths are slash-separated (`meetings/abc/reaction`). Every call may fail
/// with [`RealtimeError::Connectivity`].
pub trait RealtimeDatabase: Send + Sync + 'static {
    /// Read the value at `path`. Absent values are [`RealtimeError::NotFound`].
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, RealtimeError>> + Send;

    /// Replace the value at `path`. Writing `Value::Null` deletes it.
    fn set(&self, path: &str, value: Value)
        -> impl Future<Output = Result<(), RealtimeError>> + Send;

    /// Atomically read, transform and write the value at `path`.
    ///
    /// `apply` receives the current value (`None` when absent). An error
    /// returned by `apply` aborts the write. Returns the written value.
    fn update<F>(
        &self,
        path: &str,
        apply: F,
    ) -> impl Future<Output = Result<Value, RealtimeError>> + Send
    where
        F: FnOnce(Option<Value>) -> Result<Value, RealtimeError> + Send + 'static;

    /// Listen to `path`. The subscription carries the current value and
    /// then every change; dropping it removes the listener.
    fn subscribe(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Subscription, RealtimeError>> + Send;
}
