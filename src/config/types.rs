use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

/// Rules applied to a built document before it can be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum title length in characters (default: 5).
    #[serde(default = "default_title_min_chars")]
    pub title_min_chars: usize,
    /// Maximum title length in characters (default: 100).
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
    /// Maximum description length in characters (default: 2000).
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
    /// Maximum number of dynamic blocks (default: 50).
    #[serde(default = "default_max_blocks")]
    pub max_blocks: usize,
}

/// Locations of the collections in the realtime document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeConfig {
    #[serde(default = "default_meetings_path")]
    pub meetings_path: String,
    #[serde(default = "default_unpublished_meetings_path")]
    pub unpublished_meetings_path: String,
    #[serde(default = "default_locations_path")]
    pub locations_path: String,
    #[serde(default = "default_stories_path")]
    pub stories_path: String,
    #[serde(default = "default_users_path")]
    pub users_path: String,
    #[serde(default = "default_categories_path")]
    pub categories_path: String,
}

fn default_title_min_chars() -> usize {
    5
}

fn default_title_max_chars() -> usize {
    100
}

fn default_description_max_chars() -> usize {
    2000
}

fn default_max_blocks() -> usize {
    50
}

fn default_meetings_path() -> String {
    "meetings".to_string()
}

fn default_unpublished_meetings_path() -> String {
    "unpublished_meetings".to_string()
}

fn default_locations_path() -> String {
    "locations".to_string()
}

fn default_stories_path() -> String {
    "stories".to_string()
}

fn default_users_path() -> String {
    "users".to_string()
}

fn default_categories_path() -> String {
    "categories".to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            title_min_chars: default_title_min_chars(),
            title_max_chars: default_title_max_chars(),
            description_max_chars: default_description_max_chars(),
            max_blocks: default_max_blocks(),
        }
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            meetings_path: default_meetings_path(),
            unpublished_meetings_path: default_unpublished_meetings_path(),
            locations_path: default_locations_path(),
            stories_path: default_stories_path(),
            users_path: default_users_path(),
            categories_path: default_categories_path(),
        }
    }
}
