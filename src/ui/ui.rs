use crate::app::{App, SearchPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::footer::render_footer;
use super::loading::render_loading;
use super::movie_grid::render_movie_grid;
use super::movie_modal::render_movie_modal;
use super::notice::render_notice;
use super::pagination::{render_pagination, show_pagination};
use super::search_bar::render_search_bar;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    // Previous results stay on screen while a page change is in flight, so
    // the grid (and its pagination) survives the Loading phase
    let has_results = !app.movies.is_empty();
    let paginated = show_pagination(app);

    let mut constraints = vec![
        Constraint::Length(3), // Search bar
        Constraint::Min(1),    // Content
    ];
    if paginated {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3)); // Footer

    let full = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(full);

    render_search_bar(frame, app, chunks[0]);

    match app.phase {
        SearchPhase::Loading if !has_results => render_loading(frame, chunks[1]),
        _ => render_movie_grid(frame, app, chunks[1]),
    }

    if paginated {
        render_pagination(frame, app, chunks[2]);
    }

    render_footer(frame, app, chunks[chunks.len() - 1]);

    // Overlays are drawn last: at most one modal per frame, notice on top
    if app.selected_movie.is_some() {
        render_movie_modal(frame, app, full);
    }
    render_notice(frame, app, full);
}
