mod common;

use std::sync::Arc;
use std::time::Duration;

use meetup_core::config::RealtimeConfig;
use meetup_core::content::{BlockField, BlockKind, ContentBlock, HeaderField, RulesValidator};
use meetup_core::meeting::{
    City, DraftEvent, DraftTextField, Meeting, ReactionKind, StoriesRepository, User,
};
use meetup_core::mvi::Engine;
use meetup_core::realtime::{MemoryDatabase, RealtimeDatabase, RealtimeError};
use meetup_core::screens::create_article::{
    ArticleEffect, ArticleEvent, ArticleState, ArticleViewModel,
};
use meetup_core::screens::create_meeting::{
    CreateMeetingEffect, CreateMeetingEvent, CreateMeetingState, CreateMeetingViewModel,
};
use meetup_core::screens::meeting_info::{
    MeetingInfoEffect, MeetingInfoEvent, MeetingInfoState, MeetingInfoViewModel,
};
use meetup_core::screens::startup::{
    Feeds, LocalSession, RealtimeStartup, StartRoute, StartupChecks, StartupEffect, StartupEvent,
    StartupState, StartupViewModel,
};
use tokio::sync::Barrier;

fn session(user_id: Option<&str>, city: Option<&str>, verified: bool) -> LocalSession {
    LocalSession {
        user_id: user_id.map(str::to_string),
        city: city.map(|name| City {
            name: name.to_string(),
            ..City::default()
        }),
        verification_completed: verified,
    }
}

fn startup_engine(
    database: &Arc<MemoryDatabase>,
    session: LocalSession,
) -> Engine<StartupViewModel<RealtimeStartup<MemoryDatabase>>> {
    let checks = RealtimeStartup::new(Arc::clone(database), RealtimeConfig::default(), session);
    Engine::spawn(StartupViewModel::new(checks), StartupState::initial())
}

#[tokio::test]
async fn test_startup_routes_ready_user_to_meetings() {
    let database = common::seeded_database();
    let engine = startup_engine(
        &database,
        session(Some(common::USER_ID), Some("Lisbon"), true),
    );
    let mut effects = engine.effects();
    assert!(engine.current_state().loading);

    engine.set_event(StartupEvent::Init);
    engine.flush().await;

    let state = engine.current_state();
    assert!(!state.loading);
    assert!(state.is_authorized && state.is_city_set && state.is_verification_completed);
    assert!(state.feeds_ready);
    assert_eq!(state.route, Some(StartRoute::Meetings));
    assert_eq!(state.user.map(|u| u.id), Some(common::USER_ID.to_string()));
    assert_eq!(
        effects.next().await,
        Some(StartupEffect::Navigate(StartRoute::Meetings))
    );

    // Meetings and stories stay subscribed until the screen goes away.
    assert_eq!(database.listener_count(), 2);
    engine.shutdown().await;
    assert!(common::wait_until(Duration::from_secs(1), || database.listener_count() == 0).await);
}

#[tokio::test]
async fn test_startup_route_priority() {
    let cases = [
        (session(None, Some("Lisbon"), true), StartRoute::Auth),
        (session(Some("u-ghost"), Some("Lisbon"), true), StartRoute::Auth),
        (session(Some(common::USER_ID), Some("Lisbon"), false), StartRoute::Verification),
        (session(Some(common::USER_ID), None, true), StartRoute::Cities),
        (session(Some(common::USER_ID), Some(""), true), StartRoute::Cities),
    ];

    for (session, expected) in cases {
        let database = common::seeded_database();
        let engine = startup_engine(&database, session);
        engine.set_event(StartupEvent::Init);
        engine.flush().await;
        assert_eq!(engine.current_state().route, Some(expected));
    }
}

#[tokio::test]
async fn test_startup_offline_reports_error_and_routes_to_auth() {
    let database = common::seeded_database();
    database.set_online(false);
    let engine = startup_engine(
        &database,
        session(Some(common::USER_ID), Some("Lisbon"), true),
    );

    engine.set_event(StartupEvent::Init);
    engine.flush().await;

    let state = engine.current_state();
    assert!(!state.feeds_ready);
    assert_eq!(state.error.as_deref(), Some("No connection, try again later"));
    assert_eq!(state.route, Some(StartRoute::Auth));
    assert_eq!(database.listener_count(), 0);
}

/// Every check waits for the other three; completes only when they run
/// concurrently.
struct RendezvousChecks {
    barrier: Arc<Barrier>,
    database: Arc<MemoryDatabase>,
}

impl StartupChecks for RendezvousChecks {
    async fn authorized_user(&self) -> Result<User, RealtimeError> {
        self.barrier.wait().await;
        Ok(common::user(common::USER_ID))
    }

    async fn local_city(&self) -> Result<Option<City>, RealtimeError> {
        self.barrier.wait().await;
        Ok(Some(common::user(common::USER_ID).city))
    }

    async fn verification_completed(&self) -> Result<bool, RealtimeError> {
        self.barrier.wait().await;
        Ok(true)
    }

    async fn subscribe_feeds(&self) -> Result<Feeds, RealtimeError> {
        self.barrier.wait().await;
        let meetings = common::meetings_repository(&self.database)
            .subscribe_meetings()
            .await?;
        let stories = StoriesRepository::new(Arc::clone(&self.database), RealtimeConfig::default())
            .subscribe_stories()
            .await?;
        Ok(Feeds { meetings, stories })
    }
}

#[tokio::test]
async fn test_startup_checks_run_concurrently_and_commit_once() {
    let database = common::seeded_database();
    let checks = RendezvousChecks {
        barrier: Arc::new(Barrier::new(4)),
        database: Arc::clone(&database),
    };
    let engine = Engine::spawn(StartupViewModel::new(checks), StartupState::initial());
    let mut states = engine.states();
    states.borrow_and_update();

    engine.set_event(StartupEvent::Init);
    tokio::time::timeout(Duration::from_secs(2), engine.flush())
        .await
        .expect("startup checks did not run concurrently");

    // One commit carrying all four results.
    assert!(states.has_changed().unwrap());
    let state = states.borrow_and_update().clone();
    assert_eq!(state.route, Some(StartRoute::Meetings));
    assert!(state.feeds_ready);
    assert!(!states.has_changed().unwrap());
}

fn article_engine(database: &Arc<MemoryDatabase>) -> Engine<ArticleViewModel<MemoryDatabase>> {
    let view_model = ArticleViewModel::new(
        common::directory(database),
        common::USER_ID,
        Arc::new(RulesValidator::default()),
    );
    Engine::spawn(view_model, ArticleState::default())
}

#[tokio::test]
async fn test_article_init_loads_author() {
    let database = common::seeded_database();
    let engine = article_engine(&database);

    engine.set_event(ArticleEvent::Init);
    engine.flush().await;

    let state = engine.current_state();
    assert_eq!(state.author, Some(common::user(common::USER_ID)));
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_article_add_block_reports_index() {
    let database = common::seeded_database();
    let engine = article_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(ArticleEvent::AddBlock(BlockKind::SubTitle));
    engine.set_event(ArticleEvent::AddBlock(BlockKind::ImageGallery));
    engine.flush().await;

    assert_eq!(effects.next().await, Some(ArticleEffect::ItemAdded { index: 0 }));
    assert_eq!(effects.next().await, Some(ArticleEffect::ItemAdded { index: 1 }));
    assert_eq!(engine.current_state().builder.len(), 2);
}

#[tokio::test]
async fn test_article_edits_follow_positions_after_removal() {
    let database = common::seeded_database();
    let engine = article_engine(&database);

    engine.set_event(ArticleEvent::AddBlock(BlockKind::SubTitle));
    engine.set_event(ArticleEvent::AddBlock(BlockKind::ImageGallery));
    engine.set_event(ArticleEvent::FieldChanged {
        index: 1,
        sub_index: Some(0),
        field: BlockField::ImageLink,
        value: "http://x".to_string(),
    });
    engine.set_event(ArticleEvent::RemoveBlock { index: 0 });
    // Stale: only one block remains.
    engine.set_event(ArticleEvent::RemoveBlock { index: 1 });
    engine.flush().await;

    let state = engine.current_state();
    assert_eq!(state.builder.len(), 1);
    match state.builder.block(0) {
        Some(ContentBlock::ImageGallery { images }) => assert_eq!(images[0].link, "http://x"),
        other => panic!("Expected gallery, got {:?}", other),
    }

    engine.set_event(ArticleEvent::RemoveNestedItem {
        index: 0,
        sub_index: 0,
    });
    engine.flush().await;
    assert!(engine.current_state().builder.is_empty());
}

#[tokio::test]
async fn test_article_publish_invalid_shows_primary_error() {
    let database = common::seeded_database();
    let engine = article_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(ArticleEvent::HeaderChanged {
        field: HeaderField::ImageLink,
        value: "https://img/cover.png".to_string(),
    });
    engine.set_event(ArticleEvent::AddBlock(BlockKind::Quote));
    engine.set_event(ArticleEvent::Publish);
    engine.flush().await;

    assert_eq!(effects.next().await, Some(ArticleEffect::ItemAdded { index: 0 }));
    assert_eq!(
        effects.next().await,
        Some(ArticleEffect::ShowError(
            "Title must be at least 5 characters".to_string()
        ))
    );
    let positions: Vec<usize> = engine
        .current_state()
        .errors
        .iter()
        .map(|e| e.position)
        .collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_article_publish_valid_opens_preview() {
    let database = common::seeded_database();
    let engine = article_engine(&database);
    let mut effects = engine.effects();

    for (field, value) in [
        (HeaderField::ImageLink, "https://img/cover.png"),
        (HeaderField::Title, "Community garden day"),
        (HeaderField::Description, "Planting and watering."),
    ] {
        engine.set_event(ArticleEvent::HeaderChanged {
            field,
            value: value.to_string(),
        });
    }
    engine.set_event(ArticleEvent::Publish);
    engine.flush().await;

    match effects.next().await {
        Some(ArticleEffect::NavigateToPreview(document)) => {
            assert_eq!(document.title, "Community garden day");
            assert!(document.blocks.is_empty());
        }
        other => panic!("Expected preview, got {:?}", other),
    }
    assert!(engine.current_state().errors.is_empty());
}

fn meeting_info_engine(
    database: &Arc<MemoryDatabase>,
) -> Engine<MeetingInfoViewModel<MemoryDatabase>> {
    let view_model = MeetingInfoViewModel::new(
        common::meetings_repository(database),
        common::directory(database),
        common::USER_ID,
    );
    Engine::spawn(view_model, MeetingInfoState::default())
}

async fn stored_meeting(database: &Arc<MemoryDatabase>, id: &str) -> Meeting {
    common::meetings_repository(database).meeting(id).await.unwrap()
}

#[tokio::test]
async fn test_meeting_info_init_loads_user_and_location() {
    let database = common::seeded_database();
    let engine = meeting_info_engine(&database);

    engine.set_event(MeetingInfoEvent::Init(stored_meeting(&database, "m1").await));
    engine.flush().await;

    let state = engine.current_state();
    assert!(state.loaded);
    assert_eq!(state.own_reaction(), None);
    assert_eq!(
        state.meeting.map(|m| m.location_info.location_name),
        Some("Park".to_string())
    );
}

#[tokio::test]
async fn test_meeting_info_reaction_round_trip() {
    let database = common::seeded_database();
    let engine = meeting_info_engine(&database);

    engine.set_event(MeetingInfoEvent::Init(stored_meeting(&database, "m1").await));
    engine.set_event(MeetingInfoEvent::SetReaction(ReactionKind::Going));
    engine.flush().await;

    let state = engine.current_state();
    assert_eq!(state.own_reaction(), Some(ReactionKind::Going));
    assert_eq!(
        state.meeting.map(|m| m.reaction.people_go),
        Some(vec!["u-bob".to_string(), common::USER_ID.to_string()])
    );

    engine.set_event(MeetingInfoEvent::ClearReaction);
    engine.flush().await;
    assert_eq!(engine.current_state().own_reaction(), None);
    assert_eq!(
        stored_meeting(&database, "m1").await.reaction.people_go,
        vec!["u-bob"]
    );
}

#[tokio::test]
async fn test_meeting_info_offline_reaction_shows_error() {
    let database = common::seeded_database();
    let engine = meeting_info_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(MeetingInfoEvent::Init(stored_meeting(&database, "m1").await));
    engine.flush().await;
    database.set_online(false);
    engine.set_event(MeetingInfoEvent::SetReaction(ReactionKind::Maybe));
    engine.set_event(MeetingInfoEvent::OpenLink("https://t.me/park".to_string()));
    engine.flush().await;

    assert_eq!(
        effects.next().await,
        Some(MeetingInfoEffect::ShowError(
            "No connection, try again later".to_string()
        ))
    );
    assert_eq!(
        effects.next().await,
        Some(MeetingInfoEffect::OpenLink("https://t.me/park".to_string()))
    );
    let state = engine.current_state();
    assert_eq!(state.own_reaction(), None);
    assert!(state.error.is_some());
}

fn create_meeting_engine(
    database: &Arc<MemoryDatabase>,
) -> Engine<CreateMeetingViewModel<MemoryDatabase>> {
    let view_model = CreateMeetingViewModel::new(
        common::meetings_repository(database),
        common::directory(database),
        common::USER_ID,
    );
    Engine::spawn(view_model, CreateMeetingState::default())
}

#[tokio::test]
async fn test_create_meeting_preview_and_submit() {
    let database = common::seeded_database();
    let engine = create_meeting_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(CreateMeetingEvent::Init);
    engine.flush().await;
    let categories = engine.current_state().categories;
    assert_eq!(categories.len(), 2);

    for event in [
        DraftEvent::EditText {
            field: DraftTextField::Title,
            value: "Beach cleanup".to_string(),
        },
        DraftEvent::EditText {
            field: DraftTextField::RequiredPeopleCount,
            value: "12".to_string(),
        },
        DraftEvent::ToggleCategory(categories[0].clone()),
        DraftEvent::SelectDate("2026-08-01".to_string()),
        DraftEvent::SelectTime("10:30".to_string()),
    ] {
        engine.set_event(CreateMeetingEvent::Draft(event));
    }
    engine.set_event(CreateMeetingEvent::Preview);
    engine.flush().await;

    let meeting = match effects.next().await {
        Some(CreateMeetingEffect::NavigateToPreview(meeting)) => meeting,
        other => panic!("Expected preview, got {:?}", other),
    };
    assert!(!meeting.id.is_empty());
    assert_eq!(meeting.creator_id, common::USER_ID);
    assert_eq!(meeting.city_name, "Lisbon");
    assert_eq!(meeting.date, "2026-08-01 10:30");
    assert_eq!(meeting.required_people_count, 12);
    assert_eq!(meeting.categories, vec![categories[0].clone()]);

    engine.set_event(CreateMeetingEvent::Submit(meeting.clone()));
    engine.flush().await;

    assert_eq!(
        effects.next().await,
        Some(CreateMeetingEffect::Submitted {
            meeting_id: meeting.id.clone()
        })
    );
    let pending = common::meetings_repository(&database)
        .unpublished_meetings()
        .await
        .unwrap();
    assert_eq!(pending, vec![meeting]);
}

#[tokio::test]
async fn test_create_meeting_preview_before_profile_loads() {
    let database = common::seeded_database();
    let engine = create_meeting_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(CreateMeetingEvent::NavigateToMapDrawPath);
    engine.set_event(CreateMeetingEvent::Preview);
    engine.flush().await;

    assert_eq!(
        effects.next().await,
        Some(CreateMeetingEffect::NavigateToMapDrawPath)
    );
    assert!(matches!(
        effects.next().await,
        Some(CreateMeetingEffect::ShowError(_))
    ));
}

#[tokio::test]
async fn test_create_meeting_submit_offline_keeps_draft() {
    let database = common::seeded_database();
    let engine = create_meeting_engine(&database);
    let mut effects = engine.effects();

    engine.set_event(CreateMeetingEvent::Draft(DraftEvent::EditText {
        field: DraftTextField::Title,
        value: "Night walk".to_string(),
    }));
    engine.flush().await;
    database.set_online(false);
    engine.set_event(CreateMeetingEvent::Submit(common::meeting("m9", "2026-09-01 20:00")));
    engine.flush().await;

    assert!(matches!(
        effects.next().await,
        Some(CreateMeetingEffect::ShowError(_))
    ));
    let state = engine.current_state();
    assert_eq!(state.draft.title, "Night walk");
    assert_eq!(state.error.as_deref(), Some("No connection, try again later"));

    database.set_online(true);
    assert!(database.get("unpublished_meetings/m9").await.is_err());
}
