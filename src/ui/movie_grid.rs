use crate::app::{App, SearchPhase};
use chrono::{Datelike, NaiveDate, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

const OVERVIEW_SNIPPET_CHARS: usize = 100;

/// Renders the results area: the movie list, or the idle/empty/error state
/// matching the current search phase
pub fn render_movie_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.phase {
        SearchPhase::Idle => {
            render_idle_state(frame, area);
            return;
        }
        SearchPhase::Empty => {
            render_empty_state(frame, area, &app.query);
            return;
        }
        SearchPhase::Errored => {
            if app.api_token.is_none() {
                render_missing_token(frame, area);
            } else {
                render_error_state(frame, area);
            }
            return;
        }
        SearchPhase::Loading | SearchPhase::Loaded => {}
    }

    // Loading with previous results still on screen gets a spinner in the
    // title instead of blanking the list
    let title = if app.phase == SearchPhase::Loading {
        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let spinner_idx = (Utc::now().timestamp_millis() / 100) as usize % spinner_chars.len();
        format!(
            "Results (page {} of {}) {}",
            app.page, app.total_pages, spinner_chars[spinner_idx]
        )
    } else {
        format!("Results (page {} of {})", app.page, app.total_pages)
    };

    let items: Vec<ListItem> = app.movies.iter().map(movie_item).collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn movie_item(movie: &crate::app::tmdb::Movie) -> ListItem<'static> {
    let mut title_spans = vec![Span::styled(
        movie.title.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = release_year(&movie.release_date) {
        title_spans.push(Span::styled(
            format!(" ({})", year),
            Style::default().fg(Color::Cyan),
        ));
    }

    let detail_line = Line::from(vec![
        Span::styled(
            format!("  ★ {:.1}", movie.vote_average),
            Style::default().fg(rating_color(movie.vote_average)),
        ),
        Span::styled(
            format!("  {}", snippet(&movie.overview)),
            Style::default().fg(Color::Gray),
        ),
    ]);

    ListItem::new(vec![Line::from(title_spans), detail_line])
}

fn release_year(release_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

fn snippet(overview: &str) -> String {
    if overview.chars().count() <= OVERVIEW_SNIPPET_CHARS {
        return overview.to_string();
    }
    let cut: String = overview.chars().take(OVERVIEW_SNIPPET_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// Colors a 0-10 vote average by score band
pub fn rating_color(score: f64) -> Color {
    if score >= 7.0 {
        Color::Green
    } else if score >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn render_idle_state(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title("No search yet - press (/) to search")
        .borders(Borders::ALL);
    frame.render_widget(block, area);
}

fn render_empty_state(frame: &mut Frame, area: Rect, query: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No movies found for \"{}\"", query),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (/) to try another search",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Results").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the generic fetch-failure state
fn render_error_state(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "There was an error, please try again",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (/) to search again",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Error").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Renders missing API token instructions with big text
fn render_missing_token(frame: &mut Frame, area: Rect) {
    use ratatui::layout::{Constraint, Direction, Layout};

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Big text
            Constraint::Min(5),    // Instructions
        ])
        .split(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec!["API TOKEN".into(), "REQUIRED!".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "A TMDB API read access token is needed to search movies",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Create a free token at: https://www.themoviedb.org/settings/api",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "2. Set environment variable: export TMDB_API_TOKEN=your_token_here",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "3. Restart the application",
            Style::default().fg(Color::White),
        )),
    ];

    let paragraph = Paragraph::new(instructions)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_year_and_tolerates_garbage() {
        assert_eq!(release_year("1999-10-15"), Some(1999));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn snippet_truncates_on_char_boundaries() {
        let short = "A short overview.";
        assert_eq!(snippet(short), short);

        let long = "é".repeat(150);
        let cut = snippet(&long);
        assert!(cut.chars().count() <= OVERVIEW_SNIPPET_CHARS + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn rating_bands() {
        assert_eq!(rating_color(8.4), Color::Green);
        assert_eq!(rating_color(5.0), Color::Yellow);
        assert_eq!(rating_color(3.2), Color::Red);
    }
}
