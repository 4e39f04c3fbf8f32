use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the search bar: an input line while editing, otherwise the
/// current query (or a hint when nothing has been searched yet)
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (line, border_style) = if app.searching {
        (
            Line::from(vec![
                Span::styled(app.search_term.clone(), Style::default().fg(Color::White)),
                Span::styled("█", Style::default().fg(Color::Yellow)),
            ]),
            Style::default().fg(Color::Yellow),
        )
    } else if app.query.is_empty() {
        (
            Line::from(Span::styled(
                "Press (/) to search movies",
                Style::default().fg(Color::Gray),
            )),
            Style::default(),
        )
    } else {
        (
            Line::from(Span::styled(
                app.query.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Style::default(),
        )
    };

    let block = Block::default()
        .title("Movie Search")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
