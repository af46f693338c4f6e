//! Meetings domain: records, reactions, repositories and the creation form.

mod draft;
mod reaction;
mod repository;
mod types;

pub use draft::{DetailKind, DraftEvent, DraftTextField, MeetingDraft, MeetingDraftReducer};
pub use reaction::{Reaction, ReactionKind};
pub use repository::{DirectoryRepository, MeetingsRepository, StoriesRepository};
pub use types::{
    Category, City, Coordinate, Details, LocationInfo, Meeting, Story, TakeWithYouInfo, User,
};
