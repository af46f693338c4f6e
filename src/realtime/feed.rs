use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::error::RealtimeError;
use super::subscription::Subscription;

/// Decode a keyed collection (`{id: record, ...}`) into its records,
/// ordered by key. `Value::Null` is an empty collection.
pub fn decode_children<T: DeserializeOwned>(
    path: &str,
    value: &Value,
) -> Result<Vec<T>, RealtimeError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let records: BTreeMap<String, T> =
        serde_json::from_value(value.clone()).map_err(|source| RealtimeError::Decode {
            path: path.to_string(),
            source,
        })?;
    Ok(records.into_values().collect())
}

/// A subscription decoded into a continuously updated list.
///
/// Dropping the feed stops the forwarding task and releases the
/// underlying listener.
pub struct LiveFeed<T> {
    items: watch::Receiver<Vec<T>>,
    task: JoinHandle<()>,
}

impl<T> LiveFeed<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Start forwarding `subscription`. `arrange` orders each decoded
    /// snapshot before it is published.
    pub fn start(subscription: Subscription, arrange: fn(&mut Vec<T>)) -> Self {
        let path = subscription.path().to_string();
        let initial = decode_or_empty(&path, subscription.initial(), arrange);
        let (sender, items) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut subscription = subscription;
            while let Some(value) = subscription.next().await {
                match decode_children::<T>(&path, &value) {
                    Ok(mut records) => {
                        arrange(&mut records);
                        if sender.send(records).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(path = %path, error = %err, "skipping undecodable feed update");
                    }
                }
            }
            tracing::debug!(path = %path, "live feed stopped");
        });

        Self { items, task }
    }

    /// Observer of published snapshots.
    pub fn items(&self) -> watch::Receiver<Vec<T>> {
        self.items.clone()
    }
}

impl<T: Clone> LiveFeed<T> {
    pub fn current(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T> Drop for LiveFeed<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn decode_or_empty<T: DeserializeOwned>(
    path: &str,
    value: &Value,
    arrange: fn(&mut Vec<T>),
) -> Vec<T> {
    match decode_children(path, value) {
        Ok(mut records) => {
            arrange(&mut records);
            records
        }
        Err(err) => {
            tracing::warn!(path, error = %err, "initial feed snapshot undecodable");
            Vec::new()
        }
    }
}
