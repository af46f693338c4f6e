pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod meeting;
pub mod mvi;
pub mod realtime;
pub mod screens;
pub mod script;

pub use error::MeetupError;
