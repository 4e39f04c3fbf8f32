use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Renders the transient notice as a small top-right overlay, on top of
/// everything else; expiry is handled by the app tick
pub fn render_notice(frame: &mut Frame, app: &App, full: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };

    let width = (notice.text.chars().count() as u16 + 4).min(full.width);
    let x = full.right().saturating_sub(width);
    let area = Rect::new(x, full.y, width, 3.min(full.height));

    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        notice.text.clone(),
        Style::default().fg(Color::White),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(paragraph, area);
}
