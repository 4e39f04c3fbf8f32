use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the loading screen shown while the first page of a search is
/// still in flight
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let loading_block = Block::default()
        .title("Results")
        .borders(Borders::ALL)
        .style(Style::default());

    // Create spinner animation (simple rotating character)
    let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
    let spinner = spinner_chars[spinner_idx];

    let loading_text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Searching movies...", spinner),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let loading_paragraph = Paragraph::new(loading_text)
        .block(loading_block)
        .alignment(Alignment::Center);

    frame.render_widget(loading_paragraph, area);
}
