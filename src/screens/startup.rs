//! Startup screen: decides where the app opens.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RealtimeConfig;
use crate::meeting::{
    City, DirectoryRepository, Meeting, MeetingsRepository, StoriesRepository, Story, User,
};
use crate::mvi::{Effect, Event, Transition, UiState, ViewModel};
use crate::realtime::{LiveFeed, RealtimeDatabase, RealtimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRoute {
    Auth,
    Verification,
    Cities,
    Meetings,
}

/// Live feeds opened at startup; released when dropped.
pub struct Feeds {
    pub meetings: LiveFeed<Meeting>,
    pub stories: LiveFeed<Story>,
}

/// The four independent checks run at startup.
pub trait StartupChecks: Send + Sync + 'static {
    fn authorized_user(&self) -> impl Future<Output = Result<User, RealtimeError>> + Send;
    fn local_city(&self) -> impl Future<Output = Result<Option<City>, RealtimeError>> + Send;
    fn verification_completed(&self) -> impl Future<Output = Result<bool, RealtimeError>> + Send;
    fn subscribe_feeds(&self) -> impl Future<Output = Result<Feeds, RealtimeError>> + Send;
}

/// What the device remembers between launches.
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    pub user_id: Option<String>,
    pub city: Option<City>,
    pub verification_completed: bool,
}

/// Startup checks backed by a realtime store and the local session.
pub struct RealtimeStartup<D> {
    session: LocalSession,
    directory: DirectoryRepository<D>,
    meetings: MeetingsRepository<D>,
    stories: StoriesRepository<D>,
}

impl<D: RealtimeDatabase> RealtimeStartup<D> {
    pub fn new(database: Arc<D>, config: RealtimeConfig, session: LocalSession) -> Self {
        Self {
            session,
            directory: DirectoryRepository::new(Arc::clone(&database), config.clone()),
            meetings: MeetingsRepository::new(Arc::clone(&database), config.clone()),
            stories: StoriesRepository::new(database, config),
        }
    }
}

impl<D: RealtimeDatabase> StartupChecks for RealtimeStartup<D> {
    async fn authorized_user(&self) -> Result<User, RealtimeError> {
        let Some(user_id) = self.session.user_id.as_deref() else {
            return Err(RealtimeError::NotFound {
                path: "session/user".to_string(),
            });
        };
        self.directory.user(user_id).await
    }

    async fn local_city(&self) -> Result<Option<City>, RealtimeError> {
        Ok(self.session.city.clone())
    }

    async fn verification_completed(&self) -> Result<bool, RealtimeError> {
        Ok(self.session.verification_completed)
    }

    async fn subscribe_feeds(&self) -> Result<Feeds, RealtimeError> {
        let meetings = self.meetings.subscribe_meetings().await?;
        let stories = self.stories.subscribe_stories().await?;
        Ok(Feeds { meetings, stories })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupEvent {
    Init,
}

impl Event for StartupEvent {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupState {
    pub loading: bool,
    pub user: Option<User>,
    pub is_authorized: bool,
    pub is_city_set: bool,
    pub is_verification_completed: bool,
    pub feeds_ready: bool,
    pub error: Option<String>,
    pub route: Option<StartRoute>,
}

impl UiState for StartupState {}

impl StartupState {
    pub fn initial() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn start_route(&self) -> StartRoute {
        if !self.is_authorized {
            StartRoute::Auth
        } else if !self.is_verification_completed {
            StartRoute::Verification
        } else if !self.is_city_set {
            StartRoute::Cities
        } else {
            StartRoute::Meetings
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupEffect {
    Navigate(StartRoute),
}

impl Effect for StartupEffect {}

pub struct StartupViewModel<C> {
    checks: C,
    feeds: Mutex<Option<Feeds>>,
}

impl<C: StartupChecks> StartupViewModel<C> {
    pub fn new(checks: C) -> Self {
        Self {
            checks,
            feeds: Mutex::new(None),
        }
    }

    async fn init(&self, mut state: StartupState) -> Transition<StartupState, StartupEffect> {
        let (user, city, verified, feeds) = tokio::join!(
            self.checks.authorized_user(),
            self.checks.local_city(),
            self.checks.verification_completed(),
            self.checks.subscribe_feeds(),
        );

        match user {
            Ok(user) => {
                state.is_authorized = true;
                state.user = Some(user);
            }
            Err(err) => {
                tracing::info!(error = %err, "no authorized user");
                state.is_authorized = false;
                state.user = None;
            }
        }

        state.is_city_set = match city {
            Ok(city) => city.is_some_and(|city| !city.name.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "local city unavailable");
                false
            }
        };

        state.is_verification_completed = match verified {
            Ok(verified) => verified,
            Err(err) => {
                tracing::warn!(error = %err, "verification state unavailable");
                false
            }
        };

        match feeds {
            Ok(feeds) => {
                *self.feeds.lock() = Some(feeds);
                state.feeds_ready = true;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to subscribe feeds");
                state.feeds_ready = false;
                state.error = Some(err.user_message().to_string());
            }
        }

        let route = state.start_route();
        state.route = Some(route);
        state.loading = false;
        tracing::info!(?route, "start route resolved");
        Transition::to(state).with_effect(StartupEffect::Navigate(route))
    }
}

impl<C: StartupChecks> ViewModel for StartupViewModel<C> {
    type Event = StartupEvent;
    type State = StartupState;
    type Effect = StartupEffect;

    async fn handle(
        &self,
        event: StartupEvent,
        state: StartupState,
    ) -> Transition<StartupState, StartupEffect> {
        match event {
            StartupEvent::Init => self.init(state).await,
        }
    }
}
