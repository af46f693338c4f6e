//! Meetings, stories, users and categories over a realtime store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::reaction::ReactionKind;
use super::types::{Category, LocationInfo, Meeting, Story, User};
use crate::config::RealtimeConfig;
use crate::realtime::{decode_children, LiveFeed, RealtimeDatabase, RealtimeError};

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, RealtimeError> {
    serde_json::from_value(value).map_err(|source| RealtimeError::Decode {
        path: path.to_string(),
        source,
    })
}

fn encode<T: Serialize>(path: &str, record: &T) -> Result<Value, RealtimeError> {
    serde_json::to_value(record).map_err(|source| RealtimeError::Encode {
        path: path.to_string(),
        source,
    })
}

/// Decode the record at `path`, apply `change`, encode it back.
/// Runs inside a store transaction.
fn modify<T, F>(path: &str, current: Option<Value>, change: F) -> Result<Value, RealtimeError>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(&mut T),
{
    let current = current.ok_or_else(|| RealtimeError::NotFound {
        path: path.to_string(),
    })?;
    let mut record: T = decode(path, current)?;
    change(&mut record);
    encode(path, &record)
}

fn newest_first(meetings: &mut Vec<Meeting>) {
    meetings.sort_by(|a, b| b.date.cmp(&a.date));
}

fn keep_order<T>(_: &mut Vec<T>) {}

pub struct MeetingsRepository<D> {
    database: Arc<D>,
    config: RealtimeConfig,
}

impl<D> Clone for MeetingsRepository<D> {
    fn clone(&self) -> Self {
        Self {
            database: Arc::clone(&self.database),
            config: self.config.clone(),
        }
    }
}

impl<D: RealtimeDatabase> MeetingsRepository<D> {
    pub fn new(database: Arc<D>, config: RealtimeConfig) -> Self {
        Self { database, config }
    }

    fn meeting_path(&self, meeting_id: &str) -> String {
        format!("{}/{}", self.config.meetings_path, meeting_id)
    }

    /// Live list of published meetings, newest first.
    pub async fn subscribe_meetings(&self) -> Result<LiveFeed<Meeting>, RealtimeError> {
        let subscription = self.database.subscribe(&self.config.meetings_path).await?;
        Ok(LiveFeed::start(subscription, newest_first))
    }

    pub async fn meeting(&self, meeting_id: &str) -> Result<Meeting, RealtimeError> {
        let path = self.meeting_path(meeting_id);
        let value = self.database.get(&path).await?;
        decode(&path, value)
    }

    /// Meetings awaiting moderation. An absent collection is empty.
    pub async fn unpublished_meetings(&self) -> Result<Vec<Meeting>, RealtimeError> {
        let path = &self.config.unpublished_meetings_path;
        match self.database.get(path).await {
            Ok(value) => decode_children(path, &value),
            Err(RealtimeError::NotFound { .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Submit a new meeting for moderation.
    pub async fn submit(&self, meeting: &Meeting) -> Result<(), RealtimeError> {
        let path = format!("{}/{}", self.config.unpublished_meetings_path, meeting.id);
        let value = encode(&path, meeting)?;
        self.database.set(&path, value).await?;
        tracing::info!(meeting_id = %meeting.id, "meeting submitted for moderation");
        Ok(())
    }

    pub async fn meeting_location(&self, meeting_id: &str) -> Result<LocationInfo, RealtimeError> {
        let path = format!("{}/{}", self.config.locations_path, meeting_id);
        let value = self.database.get(&path).await?;
        decode(&path, value)
    }

    /// Record `user_id`'s reaction in a single store transaction, so
    /// concurrent reactions from other users are never lost.
    pub async fn set_reaction(
        &self,
        meeting_id: &str,
        user_id: &str,
        kind: ReactionKind,
    ) -> Result<Meeting, RealtimeError> {
        let path = self.meeting_path(meeting_id);
        let user_id = user_id.to_string();
        let tx_path = path.clone();
        let value = self
            .database
            .update(&path, move |current| {
                modify(&tx_path, current, |meeting: &mut Meeting| {
                    meeting.reaction.set(&user_id, kind)
                })
            })
            .await?;
        tracing::debug!(meeting_id, ?kind, "reaction stored");
        decode(&path, value)
    }

    pub async fn clear_reaction(
        &self,
        meeting_id: &str,
        user_id: &str,
    ) -> Result<Meeting, RealtimeError> {
        let path = self.meeting_path(meeting_id);
        let user_id = user_id.to_string();
        let tx_path = path.clone();
        let value = self
            .database
            .update(&path, move |current| {
                modify(&tx_path, current, |meeting: &mut Meeting| {
                    meeting.reaction.clear(&user_id)
                })
            })
            .await?;
        decode(&path, value)
    }
}

pub struct StoriesRepository<D> {
    database: Arc<D>,
    config: RealtimeConfig,
}

impl<D: RealtimeDatabase> StoriesRepository<D> {
    pub fn new(database: Arc<D>, config: RealtimeConfig) -> Self {
        Self { database, config }
    }

    pub async fn subscribe_stories(&self) -> Result<LiveFeed<Story>, RealtimeError> {
        let subscription = self.database.subscribe(&self.config.stories_path).await?;
        Ok(LiveFeed::start(subscription, keep_order))
    }

    /// Mark a story as seen by `user_id`. Each viewer is recorded once.
    pub async fn set_story_viewed(
        &self,
        story_id: &str,
        user_id: &str,
    ) -> Result<Story, RealtimeError> {
        let path = format!("{}/{}", self.config.stories_path, story_id);
        let user_id = user_id.to_string();
        let tx_path = path.clone();
        let value = self
            .database
            .update(&path, move |current| {
                modify(&tx_path, current, |story: &mut Story| {
                    if !story.viewers.contains(&user_id) {
                        story.viewers.push(user_id);
                    }
                })
            })
            .await?;
        decode(&path, value)
    }
}

/// Users and the category catalog.
pub struct DirectoryRepository<D> {
    database: Arc<D>,
    config: RealtimeConfig,
}

impl<D: RealtimeDatabase> DirectoryRepository<D> {
    pub fn new(database: Arc<D>, config: RealtimeConfig) -> Self {
        Self { database, config }
    }

    pub async fn user(&self, user_id: &str) -> Result<User, RealtimeError> {
        let path = format!("{}/{}", self.config.users_path, user_id);
        let value = self.database.get(&path).await?;
        decode(&path, value)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, RealtimeError> {
        let path = &self.config.categories_path;
        match self.database.get(path).await {
            Ok(value) => decode_children(path, &value),
            Err(RealtimeError::NotFound { .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}
