use crate::app::{App, CurrentScreen, SearchPhase, TrailerView};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.searching {
        return "(Enter) to search, (Esc) to cancel";
    }

    match app.current_screen {
        CurrentScreen::Main => match app.phase {
            SearchPhase::Idle => "(/) to search movies, (q) to quit",
            SearchPhase::Loading => "Searching... (q) to quit",
            SearchPhase::Loaded => {
                "(↑↓/jk) select, (←→/hl) page, (Enter) details, (/) new search, (q) quit"
            }
            SearchPhase::Empty | SearchPhase::Errored => "(/) to search again, (q) to quit",
        },
        CurrentScreen::Detail => match app.trailer {
            TrailerView::Info => "(t) to watch trailer, (Esc/x) to close",
            TrailerView::Loading => "Loading trailer... (Esc/x) to close",
            _ => "(b) to go back, (Esc/x) to close",
        },
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default())).block(bottom_block);

    frame.render_widget(bottom, area);
}
