use crate::app::{App, TrailerView};
use crate::app::tmdb::{self, Movie};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

use super::movie_grid::rating_color;

/// Renders the movie detail overlay, centered over the results. The area
/// it occupies is recorded on the app so mouse clicks can tell the panel
/// apart from the backdrop behind it.
pub fn render_movie_modal(frame: &mut Frame, app: &mut App, full: Rect) {
    let Some(movie) = app.selected_movie.clone() else {
        return;
    };

    let area = centered_rect(80, 80, full);
    app.modal_area = Some(area);

    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(format!("Movie Details - {}", movie.title))
        .borders(Borders::ALL);
    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Backdrop
            Constraint::Length(2),      // Title line
            Constraint::Min(5),         // Info or trailer sub-view
            Constraint::Length(1),      // Footer
        ])
        .split(inner_area);

    render_backdrop_section(frame, chunks[0], app, &movie);
    render_title_section(frame, chunks[1], &movie);

    match app.trailer.clone() {
        TrailerView::Info => render_info_section(frame, chunks[2], &movie),
        TrailerView::Loading => render_trailer_loading(frame, chunks[2]),
        TrailerView::Ready { key, name } => render_trailer_ready(frame, chunks[2], &key, &name),
        TrailerView::NotFound => render_trailer_not_found(frame, chunks[2]),
    }

    let hint = match app.trailer {
        TrailerView::Info => "(t) watch trailer | (Esc/x) close",
        TrailerView::Loading => "(Esc/x) close",
        _ => "(b) back | (Esc/x) close",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

/// Renders the backdrop image, or a placeholder while it downloads or when
/// the movie has none
fn render_backdrop_section(frame: &mut Frame, area: Rect, app: &mut App, movie: &Movie) {
    let block = Block::default().borders(Borders::ALL).title("Backdrop");

    if let Some(protocol) = &mut app.backdrop {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_stateful_widget(image, inner, protocol);
        return;
    }

    let text = if movie.backdrop_path.is_some() && !app.backdrop_failed {
        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
        format!("{} Loading backdrop...", spinner_chars[spinner_idx])
    } else {
        "No backdrop available".to_string()
    };

    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(placeholder, area);
}

fn render_title_section(frame: &mut Frame, area: Rect, movie: &Movie) {
    let title_info = vec![
        Line::from(vec![
            Span::styled(
                movie.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("★ {:.1}/10", movie.vote_average),
                Style::default().fg(rating_color(movie.vote_average)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Release Date: ", Style::default().fg(Color::Gray)),
            Span::styled(
                if movie.release_date.is_empty() {
                    "Unknown".to_string()
                } else {
                    movie.release_date.clone()
                },
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(title_info), area);
}

fn render_info_section(frame: &mut Frame, area: Rect, movie: &Movie) {
    let mut content = vec![Line::from(Span::styled(
        "Overview:",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if movie.overview.is_empty() {
        content.push(Line::from(Span::styled(
            "No overview available",
            Style::default().fg(Color::Gray),
        )));
    } else {
        content.push(Line::from(Span::styled(
            movie.overview.clone(),
            Style::default().fg(Color::White),
        )));
    }

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_trailer_loading(frame: &mut Frame, area: Rect) {
    let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Loading trailer...", spinner_chars[spinner_idx]),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_trailer_ready(frame: &mut Frame, area: Rect, key: &str, name: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Watch at: ", Style::default().fg(Color::Gray)),
            Span::styled(
                tmdb::watch_url(key),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_trailer_not_found(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No trailer available",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Helper to build a rect centered inside `r` by percentage
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(80, 80, parent);
        assert!(rect.x >= parent.x && rect.y >= parent.y);
        assert!(rect.right() <= parent.right() && rect.bottom() <= parent.bottom());
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 32);
    }
}
