//! Meeting-creation form state.

use super::types::{
    Category, Coordinate, Details, LocationInfo, Meeting, TakeWithYouInfo, User,
};
use crate::mvi::{Event, Reducer, UiState};

/// Free-text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftTextField {
    TopImage,
    Title,
    Description,
    RequiredPeopleCount,
    Telegram,
    PostersMotivation,
    Location,
    LocationDetails,
}

/// Repeated string lists of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Goals,
    Slogans,
    Strategy,
    PosterLinks,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    EditText { field: DraftTextField, value: String },
    AddDetail(DetailKind),
    EditDetail {
        kind: DetailKind,
        index: usize,
        value: String,
    },
    RemoveDetail { kind: DetailKind, index: usize },
    ToggleCategory(Category),
    ShowDateTimePicker,
    SelectDate(String),
    SelectTime(String),
    SetPath(Vec<Coordinate>),
    SetStartLocation(Coordinate),
}

impl Event for DraftEvent {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingDraft {
    pub image_link: String,
    pub title: String,
    pub description: String,
    pub required_people_count: String,
    pub telegram: String,
    pub posters_motivation: String,
    pub location: String,
    pub location_details: String,
    pub goals: Vec<String>,
    pub slogans: Vec<String>,
    pub strategy: Vec<String>,
    pub posters: Vec<String>,
    pub selected_categories: Vec<Category>,
    pub show_date_picker: bool,
    pub show_time_picker: bool,
    pub selected_date: String,
    pub selected_time: String,
    pub path: Vec<Coordinate>,
    pub start_location: Coordinate,
}

impl UiState for MeetingDraft {}

impl MeetingDraft {
    pub fn details(&self, kind: DetailKind) -> &[String] {
        match kind {
            DetailKind::Goals => &self.goals,
            DetailKind::Slogans => &self.slogans,
            DetailKind::Strategy => &self.strategy,
            DetailKind::PosterLinks => &self.posters,
        }
    }

    fn details_mut(&mut self, kind: DetailKind) -> &mut Vec<String> {
        match kind {
            DetailKind::Goals => &mut self.goals,
            DetailKind::Slogans => &mut self.slogans,
            DetailKind::Strategy => &mut self.strategy,
            DetailKind::PosterLinks => &mut self.posters,
        }
    }

    /// Assemble the meeting. A non-numeric people count becomes 0.
    pub fn build(&self, id: impl Into<String>, creator: &User) -> Meeting {
        Meeting {
            id: id.into(),
            city_name: creator.city.name.clone(),
            creator_id: creator.id.clone(),
            image: self.image_link.clone(),
            date: format!("{} {}", self.selected_date, self.selected_time)
                .trim()
                .to_string(),
            required_people_count: self.required_people_count.trim().parse().unwrap_or(0),
            categories: self.selected_categories.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            location_info: LocationInfo {
                location_name: self.location.clone(),
                location_start_point: self.start_location,
                location_details: self.location_details.clone(),
                path: self.path.clone(),
            },
            take_with_you_info: TakeWithYouInfo {
                posters_motivation: self.posters_motivation.clone(),
                posters: self.posters.clone(),
            },
            details: Details {
                goals: self.goals.clone(),
                slogans: self.slogans.clone(),
                strategy: self.strategy.clone(),
            },
            telegram: self.telegram.clone(),
            reaction: Default::default(),
        }
    }
}

pub struct MeetingDraftReducer;

impl Reducer for MeetingDraftReducer {
    type State = MeetingDraft;
    type Event = DraftEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            DraftEvent::EditText { field, value } => {
                let slot = match field {
                    DraftTextField::TopImage => &mut state.image_link,
                    DraftTextField::Title => &mut state.title,
                    DraftTextField::Description => &mut state.description,
                    DraftTextField::RequiredPeopleCount => &mut state.required_people_count,
                    DraftTextField::Telegram => &mut state.telegram,
                    DraftTextField::PostersMotivation => &mut state.posters_motivation,
                    DraftTextField::Location => &mut state.location,
                    DraftTextField::LocationDetails => &mut state.location_details,
                };
                *slot = value;
            }
            DraftEvent::AddDetail(kind) => state.details_mut(kind).push(String::new()),
            DraftEvent::EditDetail { kind, index, value } => {
                match state.details_mut(kind).get_mut(index) {
                    Some(item) => *item = value,
                    None => tracing::error!(?kind, index, "stale detail index ignored"),
                }
            }
            DraftEvent::RemoveDetail { kind, index } => {
                let items = state.details_mut(kind);
                if index < items.len() {
                    items.remove(index);
                } else {
                    tracing::error!(?kind, index, "stale detail index ignored");
                }
            }
            DraftEvent::ToggleCategory(category) => {
                if let Some(position) = state
                    .selected_categories
                    .iter()
                    .position(|selected| *selected == category)
                {
                    state.selected_categories.remove(position);
                } else {
                    state.selected_categories.push(category);
                }
            }
            DraftEvent::ShowDateTimePicker => state.show_date_picker = true,
            DraftEvent::SelectDate(date) => {
                state.selected_date = date;
                state.show_date_picker = false;
                state.show_time_picker = true;
            }
            DraftEvent::SelectTime(time) => {
                state.selected_time = time;
                state.show_time_picker = false;
            }
            DraftEvent::SetPath(path) => state.path = path,
            DraftEvent::SetStartLocation(position) => state.start_location = position,
        }
        state
    }
}
