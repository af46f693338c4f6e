//! Shared test utilities and seeded stores.

#![allow(dead_code, unused_imports)]

use meetup_core::config::RealtimeConfig;
use meetup_core::meeting::{
    Category, City, DirectoryRepository, Meeting, MeetingsRepository, Reaction, User,
};
use meetup_core::realtime::MemoryDatabase;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const USER_ID: &str = "u-alice";

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: id.trim_start_matches("u-").to_string(),
        city: City {
            name: "Lisbon".to_string(),
            ..City::default()
        },
        verified: true,
    }
}

pub fn meeting(id: &str, date: &str) -> Meeting {
    Meeting {
        id: id.to_string(),
        city_name: "Lisbon".to_string(),
        title: format!("Meeting {}", id),
        date: date.to_string(),
        ..Meeting::default()
    }
}

pub fn to_value<T: serde::Serialize>(record: &T) -> Value {
    serde_json::to_value(record).expect("serializable record")
}

/// Store with one user, two meetings and two categories.
pub fn seeded_database() -> Arc<MemoryDatabase> {
    let mut first = meeting("m1", "2026-05-01 10:00");
    first.reaction = Reaction {
        people_go: vec!["u-bob".to_string()],
        people_maybe_go: Vec::new(),
    };
    let second = meeting("m2", "2026-06-01 18:30");

    Arc::new(MemoryDatabase::from_value(json!({
        "users": { USER_ID: to_value(&user(USER_ID)) },
        "meetings": { "m1": to_value(&first), "m2": to_value(&second) },
        "locations": {
            "m1": {
                "locationName": "Park",
                "locationStartPoint": { "latitude": 38.7, "longitude": -9.1 }
            }
        },
        "categories": {
            "c1": { "id": "c1", "name": "Ecology" },
            "c2": { "id": "c2", "name": "Culture" }
        },
        "stories": {
            "s1": { "id": "s1", "image": "https://img/s1.png", "viewers": [] }
        }
    })))
}

pub fn meetings_repository(database: &Arc<MemoryDatabase>) -> MeetingsRepository<MemoryDatabase> {
    MeetingsRepository::new(Arc::clone(database), RealtimeConfig::default())
}

pub fn directory(database: &Arc<MemoryDatabase>) -> DirectoryRepository<MemoryDatabase> {
    DirectoryRepository::new(Arc::clone(database), RealtimeConfig::default())
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
