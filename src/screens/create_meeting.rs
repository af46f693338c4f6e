//! Meeting-creation screen.

use crate::meeting::{
    Category, DirectoryRepository, DraftEvent, Meeting, MeetingDraft, MeetingDraftReducer,
    MeetingsRepository, User,
};
use crate::mvi::{Effect, Event, Reducer, Transition, UiState, ViewModel};
use crate::realtime::RealtimeDatabase;

#[derive(Debug, Clone, PartialEq)]
pub enum CreateMeetingEvent {
    Init,
    Draft(DraftEvent),
    NavigateToMapDrawPath,
    NavigateToChooseStartLocation,
    /// Build the meeting and open the preview.
    Preview,
    /// Send the previewed meeting to moderation.
    Submit(Meeting),
}

impl Event for CreateMeetingEvent {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateMeetingState {
    pub user: Option<User>,
    pub categories: Vec<Category>,
    pub draft: MeetingDraft,
    pub error: Option<String>,
}

impl UiState for CreateMeetingState {}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateMeetingEffect {
    NavigateToMapDrawPath,
    NavigateToChooseStartLocation,
    NavigateToPreview(Meeting),
    Submitted { meeting_id: String },
    ShowError(String),
}

impl Effect for CreateMeetingEffect {}

pub struct CreateMeetingViewModel<D> {
    meetings: MeetingsRepository<D>,
    directory: DirectoryRepository<D>,
    user_id: String,
}

impl<D: RealtimeDatabase> CreateMeetingViewModel<D> {
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

    async fn init(&self, mut state: CreateMeetingState) -> CreateMeetingState {
        let (categories, user) = tokio::join!(
            self.directory.categories(),
            self.directory.user(&self.user_id),
        );

        let mut failure = None;
        match categories {
            Ok(categories) => state.categories = categories,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                failure = Some(err.user_message());
            }
        }
        match user {
            Ok(user) => state.user = Some(user),
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "failed to load user");
                failure = Some(err.user_message());
            }
        }
        state.error = failure.map(str::to_string);
        state
    }

    fn preview(
        &self,
        state: CreateMeetingState,
    ) -> Transition<CreateMeetingState, CreateMeetingEffect> {
        let Some(user) = state.user.as_ref() else {
            return Transition::to(state).with_effect(CreateMeetingEffect::ShowError(
                "Profile is still loading".to_string(),
            ));
        };
        let meeting = state.draft.build(uuid::Uuid::new_v4().to_string(), user);
        Transition::to(state).with_effect(CreateMeetingEffect::NavigateToPreview(meeting))
    }

    async fn submit(
        &self,
        mut state: CreateMeetingState,
        meeting: Meeting,
    ) -> Transition<CreateMeetingState, CreateMeetingEffect> {
        match self.meetings.submit(&meeting).await {
            Ok(()) => {
                state.error = None;
                Transition::to(state).with_effect(CreateMeetingEffect::Submitted {
                    meeting_id: meeting.id,
                })
            }
            Err(err) => {
                tracing::warn!(meeting_id = %meeting.id, error = %err, "submit failed");
                let message = err.user_message().to_string();
                state.error = Some(message.clone());
                Transition::to(state).with_effect(CreateMeetingEffect::ShowError(message))
            }
        }
    }
}

impl<D: RealtimeDatabase> ViewModel for CreateMeetingViewModel<D> {
    type Event = CreateMeetingEvent;
    type State = CreateMeetingState;
    type Effect = CreateMeetingEffect;

    async fn handle(
        &self,
        event: CreateMeetingEvent,
        mut state: CreateMeetingState,
    ) -> Transition<CreateMeetingState, CreateMeetingEffect> {
        match event {
            CreateMeetingEvent::Init => Transition::to(self.init(state).await),
            CreateMeetingEvent::Draft(event) => {
                state.draft = MeetingDraftReducer::reduce(state.draft, event);
                Transition::to(state)
            }
            CreateMeetingEvent::NavigateToMapDrawPath => {
                Transition::to(state).with_effect(CreateMeetingEffect::NavigateToMapDrawPath)
            }
            CreateMeetingEvent::NavigateToChooseStartLocation => Transition::to(state)
                .with_effect(CreateMeetingEffect::NavigateToChooseStartLocation),
            CreateMeetingEvent::Preview => self.preview(state),
            CreateMeetingEvent::Submit(meeting) => self.submit(state, meeting).await,
        }
    }
}
