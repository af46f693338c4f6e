mod common;

use std::sync::Arc;
use std::time::Duration;

use meetup_core::config::RealtimeConfig;
use meetup_core::meeting::{ReactionKind, StoriesRepository};
use meetup_core::realtime::{MemoryDatabase, RealtimeDatabase, RealtimeError};

#[tokio::test]
async fn test_repository_merges_into_existing_reaction() {
    let database = common::seeded_database();
    let repository = common::meetings_repository(&database);

    let meeting = repository
        .set_reaction("m1", common::USER_ID, ReactionKind::Going)
        .await
        .unwrap();
    assert_eq!(meeting.reaction.people_go, vec!["u-bob", common::USER_ID]);

    let again = repository
        .set_reaction("m1", common::USER_ID, ReactionKind::Going)
        .await
        .unwrap();
    assert_eq!(again.reaction, meeting.reaction);

    let stored = repository.meeting("m1").await.unwrap();
    assert_eq!(stored.reaction, meeting.reaction);
    assert_eq!(stored.title, "Meeting m1");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactions_are_all_kept() {
    let database = common::seeded_database();
    let repository = common::meetings_repository(&database);

    let mut tasks = Vec::new();
    for n in 0..20 {
        let repository = repository.clone();
        tasks.push(tokio::spawn(async move {
            let kind = if n % 2 == 0 {
                ReactionKind::Going
            } else {
                ReactionKind::Maybe
            };
            repository
                .set_reaction("m2", &format!("u-{}", n), kind)
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = repository.meeting("m2").await.unwrap();
    assert_eq!(stored.reaction.going_count(), 10);
    assert_eq!(stored.reaction.maybe_count(), 10);
}

#[tokio::test]
async fn test_reaction_on_missing_meeting_is_not_found() {
    let database = common::seeded_database();
    let repository = common::meetings_repository(&database);

    let err = repository
        .set_reaction("missing", common::USER_ID, ReactionKind::Maybe)
        .await
        .unwrap_err();
    assert!(matches!(err, RealtimeError::NotFound { path } if path == "meetings/missing"));
    assert!(database.get("meetings/missing").await.is_err());
}

#[tokio::test]
async fn test_offline_reaction_leaves_store_unchanged() {
    let database = common::seeded_database();
    let repository = common::meetings_repository(&database);
    let before = database.snapshot();

    database.set_online(false);
    let err = repository
        .set_reaction("m1", common::USER_ID, ReactionKind::Going)
        .await
        .unwrap_err();

    assert!(matches!(err, RealtimeError::Connectivity { .. }));
    assert_eq!(err.user_message(), "No connection, try again later");
    assert_eq!(database.snapshot(), before);
}

#[tokio::test]
async fn test_story_viewers_are_recorded_once() {
    let database = common::seeded_database();
    let stories = StoriesRepository::new(Arc::clone(&database), RealtimeConfig::default());

    stories.set_story_viewed("s1", common::USER_ID).await.unwrap();
    let story = stories.set_story_viewed("s1", common::USER_ID).await.unwrap();

    assert_eq!(story.viewers, vec![common::USER_ID]);
}

#[tokio::test]
async fn test_reaction_reaches_live_feed() {
    let database = common::seeded_database();
    let repository = common::meetings_repository(&database);
    let feed = repository.subscribe_meetings().await.unwrap();

    repository
        .set_reaction("m2", common::USER_ID, ReactionKind::Maybe)
        .await
        .unwrap();

    let reached = common::wait_until(Duration::from_secs(1), || {
        feed.current().iter().any(|m| {
            m.id == "m2" && m.reaction.kind_of(common::USER_ID) == Some(ReactionKind::Maybe)
        })
    })
    .await;
    assert!(reached);
}

#[tokio::test]
async fn test_memory_database_can_start_empty() {
    let database = Arc::new(MemoryDatabase::new());
    let repository = common::meetings_repository(&database);
    assert!(repository.unpublished_meetings().await.unwrap().is_empty());
}
