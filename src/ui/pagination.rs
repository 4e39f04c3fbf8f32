use crate::app::{App, SearchPhase};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

// Bounded window: 5 pages around the current one, 1 margin page at each end
const PAGE_RANGE: u32 = 5;
const MARGIN_PAGES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

/// Computes the visible page indicators for a 1-indexed pagination bar.
/// All pages are shown when they fit; otherwise the margin pages and a
/// window around the current page, with gap markers between runs.
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total <= PAGE_RANGE + 2 * MARGIN_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let half = PAGE_RANGE / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = start + PAGE_RANGE - 1;
    if end > total {
        end = total;
        start = end - (PAGE_RANGE - 1);
    }

    let mut items = Vec::new();
    let mut last = 0u32;
    for page in 1..=total {
        let in_margin = page <= MARGIN_PAGES || page > total - MARGIN_PAGES;
        let in_window = page >= start && page <= end;
        if in_margin || in_window {
            if last != 0 && page != last + 1 {
                items.push(PageItem::Gap);
            }
            items.push(PageItem::Page(page));
            last = page;
        }
    }
    items
}

/// Decides whether the pagination bar appears at all: only with results on
/// screen spanning more than one page, and never over the error view.
/// Results kept on screen during a page change count, so the bar survives
/// the Loading phase.
pub fn show_pagination(app: &App) -> bool {
    !app.movies.is_empty() && app.total_pages > 1 && app.phase != SearchPhase::Errored
}

/// Renders the pagination bar. The caller hides it entirely when there is
/// at most one page; the current page always mirrors the controller state.
pub fn render_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled("← ", Style::default().fg(Color::Gray))];

    for item in page_items(app.page, app.total_pages) {
        match item {
            PageItem::Page(page) if page == app.page => {
                spans.push(Span::styled(
                    format!(" {} ", page),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ));
            }
            PageItem::Page(page) => {
                spans.push(Span::styled(
                    format!(" {} ", page),
                    Style::default().fg(Color::White),
                ));
            }
            PageItem::Gap => {
                spans.push(Span::styled(" … ", Style::default().fg(Color::Gray)));
            }
        }
    }

    spans.push(Span::styled(" →", Style::default().fg(Color::Gray)));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tmdb::Movie;

    fn app_with(total_pages: u32, movie_count: usize, phase: SearchPhase) -> App {
        let mut app = App::new(Some("test-token".to_string()), None);
        app.total_pages = total_pages;
        app.phase = phase;
        app.movies = (0..movie_count)
            .map(|id| Movie {
                id: id as u64,
                title: format!("Movie {}", id),
                overview: String::new(),
                release_date: String::new(),
                backdrop_path: None,
                vote_average: 0.0,
            })
            .collect();
        app
    }

    #[test]
    fn bar_is_hidden_with_at_most_one_page() {
        assert!(!show_pagination(&app_with(0, 0, SearchPhase::Idle)));
        assert!(!show_pagination(&app_with(1, 5, SearchPhase::Loaded)));
    }

    #[test]
    fn bar_is_shown_for_multiple_pages_of_results() {
        assert!(show_pagination(&app_with(3, 5, SearchPhase::Loaded)));
        // results kept on screen during a page change keep the bar up
        assert!(show_pagination(&app_with(3, 5, SearchPhase::Loading)));
    }

    #[test]
    fn bar_never_covers_the_error_view() {
        assert!(!show_pagination(&app_with(3, 5, SearchPhase::Errored)));
    }

    fn pages(items: &[PageItem]) -> Vec<Option<u32>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page(p) => Some(*p),
                PageItem::Gap => None,
            })
            .collect()
    }

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(pages(&page_items(2, 3)), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(page_items(1, 7).len(), 7);
    }

    #[test]
    fn single_page_yields_single_item() {
        // the bar itself is hidden by the caller when total <= 1
        assert_eq!(pages(&page_items(1, 1)), vec![Some(1)]);
        assert!(page_items(1, 0).is_empty());
    }

    #[test]
    fn window_at_the_start_gaps_toward_the_end() {
        assert_eq!(
            pages(&page_items(1, 10)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(10)]
        );
    }

    #[test]
    fn window_in_the_middle_gaps_both_sides() {
        assert_eq!(
            pages(&page_items(6, 10)),
            vec![Some(1), None, Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(10)]
        );
    }

    #[test]
    fn window_at_the_end_gaps_toward_the_start() {
        assert_eq!(
            pages(&page_items(10, 10)),
            vec![Some(1), None, Some(6), Some(7), Some(8), Some(9), Some(10)]
        );
    }
}
