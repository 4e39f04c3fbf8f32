use std::sync::mpsc;
use std::thread;

use chrono::{DateTime, Duration, Local};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::app::tmdb::{self, Movie, MoviePage, Video};

const NOTICE_SECONDS: i64 = 2;

/// Settlement of a background fetch, tagged with the request token that
/// was current when the fetch was spawned
pub enum FetchMessage {
    Search {
        token: u64,
        outcome: Result<MoviePage, String>,
    },
    Trailers {
        token: u64,
        outcome: Result<Vec<Video>, String>,
    },
    Backdrop {
        token: u64,
        image: Option<Box<image::DynamicImage>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
    Empty,
    Errored,
}

/// Trailer sub-state, scoped to one modal-open lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerView {
    Info,
    Loading,
    Ready { key: String, name: String },
    NotFound,
}

pub struct Notice {
    pub text: String,
    expires_at: DateTime<Local>,
}

pub struct App {
    pub api_token: Option<String>,
    pub current_screen: CurrentScreen,

    // search input
    pub searching: bool,
    pub search_term: String,

    // search state, owned exclusively here
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub movies: Vec<Movie>,
    pub phase: SearchPhase,

    // selection / detail
    pub selected_index: usize,
    pub list_state: ListState,
    pub selected_movie: Option<Movie>,
    pub trailer: TrailerView,
    pub backdrop: Option<StatefulProtocol>,
    pub backdrop_failed: bool,
    pub modal_area: Option<Rect>,

    pub notice: Option<Notice>,

    picker: Option<Picker>,
    search_token: u64,
    trailer_token: u64,
    backdrop_token: u64,
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
}

impl App {
    pub fn new(api_token: Option<String>, picker: Option<Picker>) -> Self {
        let (sender, receiver) = mpsc::channel();
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            api_token,
            current_screen: CurrentScreen::Main,
            searching: false,
            search_term: String::new(),
            query: String::new(),
            page: 1,
            total_pages: 0,
            movies: Vec::new(),
            phase: SearchPhase::Idle,
            selected_index: 0,
            list_state,
            selected_movie: None,
            trailer: TrailerView::Info,
            backdrop: None,
            backdrop_failed: false,
            modal_area: None,
            notice: None,
            picker,
            search_token: 0,
            trailer_token: 0,
            backdrop_token: 0,
            sender,
            receiver,
        }
    }

    /// Submits a new search: query and page are updated together, the page
    /// always snapping back to 1. An empty query returns to Idle without
    /// issuing a fetch.
    pub fn submit_search(&mut self, query: &str) {
        let query = query.trim();
        self.query = query.to_string();
        self.page = 1;
        self.selected_index = 0;
        self.list_state.select(Some(0));

        if query.is_empty() {
            // Idle has no active key: any settlement still in flight for the
            // previous query is stale from here on
            self.search_token += 1;
            self.movies.clear();
            self.total_pages = 0;
            self.phase = SearchPhase::Idle;
            return;
        }

        self.start_search_fetch();
    }

    /// Moves to another page of the current query. Out-of-range pages are
    /// ignored so the pagination control can never navigate past the last
    /// known page.
    pub fn change_page(&mut self, page: u32) {
        if page < 1 || page > self.total_pages || page == self.page || self.query.is_empty() {
            return;
        }
        self.page = page;
        self.start_search_fetch();
    }

    pub fn next_page(&mut self) {
        self.change_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.change_page(self.page.saturating_sub(1));
    }

    fn start_search_fetch(&mut self) {
        let Some(bearer) = self.api_token.clone() else {
            // No credential: every fetch would fail authentication anyway.
            // The UI renders the token setup screen for this state.
            self.phase = SearchPhase::Errored;
            return;
        };

        self.search_token += 1;
        self.phase = SearchPhase::Loading;

        let token = self.search_token;
        let query = self.query.clone();
        let page = self.page;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let outcome = tmdb::search_movies(&bearer, &query, page).map_err(|e| e.to_string());
            let _ = sender.send(FetchMessage::Search { token, outcome });
        });
    }

    /// Applies one settled fetch. Settlements whose token no longer matches
    /// the current one are stale and are dropped without any state change.
    pub fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Search { token, outcome } => {
                if token != self.search_token {
                    return;
                }
                match outcome {
                    Ok(page) => {
                        self.movies = page.results;
                        self.total_pages = page.total_pages;
                        self.selected_index = 0;
                        self.list_state.select(Some(0));
                        if self.movies.is_empty() {
                            self.phase = SearchPhase::Empty;
                            self.notify("No movies found for your request.");
                        } else {
                            self.phase = SearchPhase::Loaded;
                        }
                    }
                    Err(_) => {
                        self.phase = SearchPhase::Errored;
                    }
                }
            }
            FetchMessage::Trailers { token, outcome } => {
                if token != self.trailer_token {
                    return;
                }
                match outcome {
                    Ok(videos) => match tmdb::pick_trailer(&videos) {
                        Some(video) => {
                            self.trailer = TrailerView::Ready {
                                key: video.key.clone(),
                                name: video.name.clone(),
                            };
                        }
                        None => {
                            self.trailer = TrailerView::NotFound;
                            self.notify("No trailer available for this movie.");
                        }
                    },
                    Err(_) => {
                        self.trailer = TrailerView::NotFound;
                        self.notify("Could not load the trailer.");
                    }
                }
            }
            FetchMessage::Backdrop { token, image } => {
                if token != self.backdrop_token {
                    return;
                }
                match image {
                    Some(image) => {
                        if let Some(picker) = &self.picker {
                            self.backdrop = Some(picker.new_resize_protocol(*image));
                        }
                    }
                    None => {
                        self.backdrop_failed = true;
                    }
                }
            }
        }
    }

    /// Drains all pending settlements from the background threads
    pub fn drain_messages(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.handle_message(message),
                Err(_) => break,
            }
        }
    }

    pub fn next_movie(&mut self) {
        let count = self.movies.len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
        self.list_state.select(Some(self.selected_index));
    }

    pub fn previous_movie(&mut self) {
        let count = self.movies.len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Opens the detail overlay for the highlighted movie. Trailer state
    /// starts fresh on every open.
    pub fn open_selected(&mut self) {
        let Some(movie) = self.movies.get(self.selected_index).cloned() else {
            return;
        };

        self.trailer = TrailerView::Info;
        self.backdrop = None;
        self.backdrop_failed = false;
        self.current_screen = CurrentScreen::Detail;
        self.start_backdrop_fetch(&movie);
        self.selected_movie = Some(movie);
    }

    /// Closes the detail overlay. Safe to call from any close path (escape
    /// key, close key, outside click); the search state is left untouched.
    pub fn close_detail(&mut self) {
        self.selected_movie = None;
        self.current_screen = CurrentScreen::Main;
        self.trailer = TrailerView::Info;
        self.backdrop = None;
        self.backdrop_failed = false;
        self.modal_area = None;
        // in-flight trailer/backdrop settlements for this lifecycle are now stale
        self.trailer_token += 1;
        self.backdrop_token += 1;
    }

    /// Starts resolving a trailer for the movie in the detail overlay
    pub fn watch_trailer(&mut self) {
        let Some(movie) = &self.selected_movie else {
            return;
        };
        let Some(bearer) = self.api_token.clone() else {
            self.trailer = TrailerView::NotFound;
            self.notify("Could not load the trailer.");
            return;
        };

        self.trailer_token += 1;
        self.trailer = TrailerView::Loading;

        let token = self.trailer_token;
        let movie_id = movie.id;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let outcome = tmdb::fetch_trailers(&bearer, movie_id).map_err(|e| e.to_string());
            let _ = sender.send(FetchMessage::Trailers { token, outcome });
        });
    }

    /// Returns from the trailer view to the movie info view, clearing all
    /// trailer sub-state so a later watch starts over
    pub fn trailer_back(&mut self) {
        self.trailer = TrailerView::Info;
        self.trailer_token += 1;
    }

    fn start_backdrop_fetch(&mut self, movie: &Movie) {
        let Some(path) = &movie.backdrop_path else {
            return;
        };
        if self.picker.is_none() {
            return;
        }

        self.backdrop_token += 1;
        let token = self.backdrop_token;
        let url = tmdb::backdrop_url(path);
        let sender = self.sender.clone();

        thread::spawn(move || {
            // failures settle too, so the modal placeholder does not spin forever
            let image = tmdb::download_backdrop(&url).ok().map(Box::new);
            let _ = sender.send(FetchMessage::Backdrop { token, image });
        });
    }

    pub fn notify(&mut self, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            expires_at: Local::now() + Duration::seconds(NOTICE_SECONDS),
        });
    }

    /// Expires the transient notice; called every event-loop iteration
    pub fn tick(&mut self) {
        if let Some(notice) = &self.notice {
            if Local::now() >= notice.expires_at {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            release_date: String::new(),
            backdrop_path: None,
            vote_average: 0.0,
        }
    }

    fn page(results: Vec<Movie>, page: u32, total_pages: u32) -> MoviePage {
        MoviePage {
            page,
            results,
            total_pages,
        }
    }

    fn app() -> App {
        App::new(Some("test-token".to_string()), None)
    }

    fn settle(app: &mut App, outcome: Result<MoviePage, String>) {
        let token = app.search_token;
        app.handle_message(FetchMessage::Search { token, outcome });
    }

    #[test]
    fn submit_resets_page_and_starts_loading() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(1, "Batman")], 1, 7)));
        app.change_page(4);
        assert_eq!(app.page, 4);

        app.submit_search("superman");
        assert_eq!(app.query, "superman");
        assert_eq!(app.page, 1);
        assert_eq!(app.phase, SearchPhase::Loading);
    }

    #[test]
    fn empty_query_goes_idle_without_fetching() {
        let mut app = app();
        app.submit_search("   ");
        assert_eq!(app.phase, SearchPhase::Idle);
        assert!(app.movies.is_empty());
        assert_eq!(app.total_pages, 0);
    }

    #[test]
    fn clearing_the_search_invalidates_the_inflight_fetch() {
        let mut app = app();
        app.submit_search("batman");
        let inflight_token = app.search_token;

        app.submit_search("");
        assert_eq!(app.phase, SearchPhase::Idle);

        // the old query settles after the search was cleared
        app.handle_message(FetchMessage::Search {
            token: inflight_token,
            outcome: Ok(page(vec![movie(1, "Batman")], 1, 3)),
        });

        assert_eq!(app.phase, SearchPhase::Idle);
        assert!(app.movies.is_empty());
        assert!(app.notice.is_none());
    }

    #[test]
    fn stale_settlement_is_discarded() {
        let mut app = app();
        app.submit_search("batman");
        let stale_token = app.search_token;
        app.submit_search("batman returns");
        assert!(app.search_token > stale_token);

        app.handle_message(FetchMessage::Search {
            token: stale_token,
            outcome: Ok(page(vec![movie(1, "Stale")], 1, 1)),
        });

        assert_eq!(app.phase, SearchPhase::Loading);
        assert!(app.movies.is_empty());
    }

    #[test]
    fn current_settlement_is_applied() {
        let mut app = app();
        app.submit_search("batman");
        settle(
            &mut app,
            Ok(page(vec![movie(1, "Batman"), movie(2, "Batman Returns")], 1, 3)),
        );

        assert_eq!(app.phase, SearchPhase::Loaded);
        assert_eq!(app.movies.len(), 2);
        assert_eq!(app.total_pages, 3);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn empty_result_notifies_once_on_transition() {
        let mut app = app();
        app.submit_search("zzzzzz");
        settle(&mut app, Ok(page(vec![], 1, 0)));

        assert_eq!(app.phase, SearchPhase::Empty);
        let text = app.notice.as_ref().map(|n| n.text.clone());
        assert_eq!(text.as_deref(), Some("No movies found for your request."));

        // rendering ticks do not re-arm the notice
        app.notice = None;
        app.tick();
        assert!(app.notice.is_none());
    }

    #[test]
    fn failed_settlement_enters_errored() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Err("connection refused".to_string()));
        assert_eq!(app.phase, SearchPhase::Errored);
    }

    #[test]
    fn page_change_keeps_query_and_previous_results() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(1, "Batman")], 1, 3)));

        app.change_page(2);
        assert_eq!(app.query, "batman");
        assert_eq!(app.page, 2);
        assert_eq!(app.phase, SearchPhase::Loading);
        // stale-while-revalidate: the old page stays visible
        assert_eq!(app.movies.len(), 1);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(1, "Batman")], 1, 3)));

        app.change_page(0);
        app.change_page(4);
        assert_eq!(app.page, 1);

        app.previous_page();
        assert_eq!(app.page, 1);
        app.next_page();
        assert_eq!(app.page, 2);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut app = app();
        app.submit_search("batman");
        settle(
            &mut app,
            Ok(page(vec![movie(1, "A"), movie(2, "B"), movie(3, "C")], 1, 1)),
        );

        app.previous_movie();
        assert_eq!(app.selected_index, 2);
        app.next_movie();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn open_and_close_detail_manage_selection_and_trailer_state() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(7, "Batman")], 1, 1)));

        app.open_selected();
        assert_eq!(app.current_screen, CurrentScreen::Detail);
        assert_eq!(app.selected_movie.as_ref().map(|m| m.id), Some(7));
        assert_eq!(app.trailer, TrailerView::Info);

        app.close_detail();
        assert_eq!(app.current_screen, CurrentScreen::Main);
        assert!(app.selected_movie.is_none());
        assert_eq!(app.trailer, TrailerView::Info);
        // closing twice is harmless; every close path runs the same cleanup
        app.close_detail();
        assert!(app.selected_movie.is_none());
    }

    #[test]
    fn trailer_fallback_and_not_found_flows() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(7, "Batman")], 1, 1)));
        app.open_selected();

        app.watch_trailer();
        assert_eq!(app.trailer, TrailerView::Loading);

        let teaser = Video {
            id: "1".to_string(),
            key: "X".to_string(),
            name: "Teaser".to_string(),
            site: "YouTube".to_string(),
            video_type: "Teaser".to_string(),
        };
        app.handle_message(FetchMessage::Trailers {
            token: app.trailer_token,
            outcome: Ok(vec![teaser]),
        });
        assert!(matches!(&app.trailer, TrailerView::Ready { key, .. } if key == "X"));

        // back clears sub-state, so a retry starts loading fresh
        app.trailer_back();
        assert_eq!(app.trailer, TrailerView::Info);
        app.watch_trailer();
        assert_eq!(app.trailer, TrailerView::Loading);

        app.handle_message(FetchMessage::Trailers {
            token: app.trailer_token,
            outcome: Ok(vec![]),
        });
        assert_eq!(app.trailer, TrailerView::NotFound);
        assert!(app.notice.is_some());
    }

    #[test]
    fn stale_trailer_settlement_is_discarded_after_back() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(7, "Batman")], 1, 1)));
        app.open_selected();

        app.watch_trailer();
        let stale_token = app.trailer_token;
        app.trailer_back();

        app.handle_message(FetchMessage::Trailers {
            token: stale_token,
            outcome: Ok(vec![]),
        });
        assert_eq!(app.trailer, TrailerView::Info);
    }

    #[test]
    fn failed_backdrop_download_settles_the_placeholder() {
        let mut app = app();
        app.submit_search("batman");
        settle(&mut app, Ok(page(vec![movie(7, "Batman")], 1, 1)));
        app.open_selected();
        assert!(!app.backdrop_failed);

        app.handle_message(FetchMessage::Backdrop {
            token: app.backdrop_token,
            image: None,
        });
        assert!(app.backdrop_failed);
        assert!(app.backdrop.is_none());

        // the flag is scoped to one modal-open lifecycle
        app.close_detail();
        assert!(!app.backdrop_failed);
    }

    #[test]
    fn missing_api_token_fails_fetch_without_spawning() {
        let mut app = App::new(None, None);
        app.submit_search("batman");
        assert_eq!(app.phase, SearchPhase::Errored);
        assert_eq!(app.search_token, 0);
    }
}
