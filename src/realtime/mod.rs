//! Realtime document-store capability and listener lifecycle.

mod database;
mod error;
mod feed;
mod memory;
mod subscription;

pub use database::RealtimeDatabase;
pub use error::RealtimeError;
pub use feed::{decode_children, LiveFeed};
pub use memory::MemoryDatabase;
pub use subscription::Subscription;
