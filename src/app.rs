mod app;
pub mod tmdb;

pub use app::{App, CurrentScreen, FetchMessage, Notice, SearchPhase, TrailerView};
