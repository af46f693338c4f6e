//! Screen view models driven by the [`Engine`](crate::mvi::Engine).

pub mod create_article;
pub mod create_meeting;
pub mod meeting_info;
pub mod startup;
