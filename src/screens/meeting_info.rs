//! Meeting details screen with going/maybe reactions.

use crate::meeting::{DirectoryRepository, Meeting, MeetingsRepository, ReactionKind, User};
use crate::mvi::{Effect, Event, Transition, UiState, ViewModel};
use crate::realtime::{RealtimeDatabase, RealtimeError};

#[derive(Debug, Clone, PartialEq)]
pub enum MeetingInfoEvent {
    Init(Meeting),
    SetReaction(ReactionKind),
    ClearReaction,
    OpenLink(String),
}

impl Event for MeetingInfoEvent {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingInfoState {
    pub loaded: bool,
    pub user: Option<User>,
    pub meeting: Option<Meeting>,
    pub error: Option<String>,
}

impl UiState for MeetingInfoState {}

impl MeetingInfoState {
    /// Reaction of the signed-in user to the shown meeting.
    pub fn own_reaction(&self) -> Option<ReactionKind> {
        let user = self.user.as_ref()?;
        self.meeting.as_ref()?.reaction.kind_of(&user.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingInfoEffect {
    OpenLink(String),
    ShowError(String),
}

impl Effect for MeetingInfoEffect {}

pub struct MeetingInfoViewModel<D> {
    meetings: MeetingsRepository<D>,
    directory: DirectoryRepository<D>,
    user_id: String,
}

impl<D: RealtimeDatabase> MeetingInfoViewModel<D> {
    pub fn new(
        meetings: MeetingsRepository<D>,
        directory: DirectoryRepository<D>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            meetings,
            directory,
            user_id: user_id.into(),
        }
    }

    async fn init(
        &self,
        mut state: MeetingInfoState,
        mut meeting: Meeting,
    ) -> Transition<MeetingInfoState, MeetingInfoEffect> {
        let (user, location) = tokio::join!(
            self.directory.user(&self.user_id),
            self.meetings.meeting_location(&meeting.id),
        );

        match location {
            Ok(location) => meeting.location_info = location,
            Err(RealtimeError::NotFound { .. }) => {}
            Err(err) => tracing::warn!(meeting_id = %meeting.id, error = %err, "location unavailable"),
        }
        state.meeting = Some(meeting);

        match user {
            Ok(user) => {
                state.user = Some(user);
                state.loaded = true;
                state.error = None;
                Transition::to(state)
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "failed to load user");
                let message = err.user_message().to_string();
                state.loaded = false;
                state.error = Some(message.clone());
                Transition::to(state).with_effect(MeetingInfoEffect::ShowError(message))
            }
        }
    }

    fn commit(
        &self,
        mut state: MeetingInfoState,
        result: Result<Meeting, RealtimeError>,
    ) -> Transition<MeetingInfoState, MeetingInfoEffect> {
        match result {
            Ok(meeting) => {
                state.meeting = Some(meeting);
                state.error = None;
                Transition::to(state)
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "reaction not stored");
                let message = err.user_message().to_string();
                state.error = Some(message.clone());
                Transition::to(state).with_effect(MeetingInfoEffect::ShowError(message))
            }
        }
    }
}

impl<D: RealtimeDatabase> ViewModel for MeetingInfoViewModel<D> {
    type Event = MeetingInfoEvent;
    type State = MeetingInfoState;
    type Effect = MeetingInfoEffect;

    async fn handle(
        &self,
        event: MeetingInfoEvent,
        state: MeetingInfoState,
    ) -> Transition<MeetingInfoState, MeetingInfoEffect> {
        match event {
            MeetingInfoEvent::Init(meeting) => self.init(state, meeting).await,
            MeetingInfoEvent::SetReaction(kind) => {
                let Some(meeting_id) = state.meeting.as_ref().map(|m| m.id.clone()) else {
                    tracing::error!("reaction before init, ignored");
                    return Transition::to(state);
                };
                let result = self
                    .meetings
                    .set_reaction(&meeting_id, &self.user_id, kind)
                    .await;
                self.commit(state, result)
            }
            MeetingInfoEvent::ClearReaction => {
                let Some(meeting_id) = state.meeting.as_ref().map(|m| m.id.clone()) else {
                    return Transition::to(state);
                };
                let result = self.meetings.clear_reaction(&meeting_id, &self.user_id).await;
                self.commit(state, result)
            }
            MeetingInfoEvent::OpenLink(link) => {
                Transition::to(state).with_effect(MeetingInfoEffect::OpenLink(link))
            }
        }
    }
}
