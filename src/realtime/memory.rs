//! In-memory realtime store.
//!
//! Backs tests and the CLI. Values form one JSON tree; listeners are
//! notified when their path, an ancestor or a descendant is written.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use super::database::RealtimeDatabase;
use super::error::RealtimeError;
use super::subscription::Subscription;

struct Listener {
    id: u64,
    path: Vec<String>,
    sender: mpsc::UnboundedSender<Value>,
}

struct Inner {
    root: Value,
    listeners: Vec<Listener>,
    next_listener_id: u64,
    online: bool,
}

/// Thread-safe in-memory document store.
#[derive(Clone)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }

    /// Seed the store with an existing tree.
    pub fn from_value(root: Value) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                root,
                listeners: Vec::new(),
                next_listener_id: 0,
                online: true,
            })),
        }
    }

    /// Simulate losing or regaining the connection.
    pub fn set_online(&self, online: bool) {
        self.inner.lock().online = online;
        tracing::info!(online, "memory database connectivity changed");
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Copy of the whole tree.
    pub fn snapshot(&self) -> Value {
        self.inner.lock().root.clone()
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn ensure_online(&self, path: &str) -> Result<(), RealtimeError> {
        if self.online {
            Ok(())
        } else {
            Err(RealtimeError::Connectivity {
                path: path.to_string(),
            })
        }
    }

    fn write(&mut self, segments: &[String], value: Value) {
        write_at(&mut self.root, segments, value);
        self.notify(segments);
    }

    fn notify(&mut self, written: &[String]) {
        let root = &self.root;
        self.listeners.retain(|listener| {
            let related = listener.path.starts_with(written) || written.starts_with(&listener.path);
            if !related {
                return true;
            }
            let value = lookup(root, &listener.path).cloned().unwrap_or(Value::Null);
            listener.sender.send(value).is_ok()
        });
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn lookup<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn write_at(root: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        *root = if value.is_null() {
            Value::Object(Map::new())
        } else {
            value
        };
        return;
    };

    let mut current = root;
    for segment in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Some(map) = current.as_object_mut() else {
            return;
        };
        current = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(map) = current.as_object_mut() {
        if value.is_null() {
            map.remove(last);
        } else {
            map.insert(last.clone(), value);
        }
    }
}

impl RealtimeDatabase for MemoryDatabase {
    async fn get(&self, path: &str) -> Result<Value, RealtimeError> {
        let inner = self.inner.lock();
        inner.ensure_online(path)?;
        lookup(&inner.root, &split(path))
            .cloned()
            .ok_or_else(|| RealtimeError::NotFound {
                path: path.to_string(),
            })
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), RealtimeError> {
        let mut inner = self.inner.lock();
        inner.ensure_online(path)?;
        inner.write(&split(path), value);
        tracing::trace!(path, "memory database write");
        Ok(())
    }

    async fn update<F>(&self, path: &str, apply: F) -> Result<Value, RealtimeError>
    where
        F: FnOnce(Option<Value>) -> Result<Value, RealtimeError> + Send + 'static,
    {
        let mut inner = self.inner.lock();
        inner.ensure_online(path)?;
        let segments = split(path);
        let current = lookup(&inner.root, &segments).cloned();
        let updated = apply(current)?;
        inner.write(&segments, updated.clone());
        tracing::trace!(path, "memory database transaction committed");
        Ok(updated)
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, RealtimeError> {
        let mut inner = self.inner.lock();
        inner.ensure_online(path)?;

        let segments = split(path);
        let initial = lookup(&inner.root, &segments)
            .cloned()
            .unwrap_or(Value::Null);
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push(Listener {
            id,
            path: segments,
            sender,
        });
        tracing::debug!(path, listener = id, "listener attached");

        let registry: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let owned_path = path.to_string();
        Ok(Subscription::new(path, initial, receiver, move || {
            if let Some(inner) = registry.upgrade() {
                inner.lock().listeners.retain(|listener| listener.id != id);
                tracing::debug!(path = %owned_path, listener = id, "listener released");
            }
        }))
    }
}
