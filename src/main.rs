mod app;
use app::App;

mod ui;

use std::error::Error;
use std::io;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::Position;
use ratatui::prelude::{Backend, CrosstermBackend};
use ratatui_image::picker::Picker;

use crate::app::{CurrentScreen, TrailerView};

fn main() -> Result<(), Box<dyn Error>> {
    // Query the terminal's graphics capabilities before entering raw mode
    let picker = Picker::from_query_stdio().ok();

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let api_token = std::env::var("TMDB_API_TOKEN").ok();
    let mut app = App::new(api_token, picker);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Apply settled fetches from the background threads and expire notices
        app.drain_messages();
        app.tick();

        // Poll for events with a timeout to keep spinners and notices moving
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind == event::KeyEventKind::Release {
                    // Skip events that are not KeyEventKind::Press
                    continue;
                }

                // Handle search input when searching is active
                if app.searching {
                    match key.code {
                        KeyCode::Char(c) => {
                            app.search_term.push(c);
                        }
                        KeyCode::Backspace => {
                            app.search_term.pop();
                        }
                        KeyCode::Enter => {
                            app.searching = false;
                            let query = app.search_term.clone();
                            app.submit_search(&query);
                        }
                        KeyCode::Esc => {
                            app.searching = false;
                            app.search_term = app.query.clone();
                        }
                        _ => {}
                    }
                    continue;
                }

                match app.current_screen {
                    CurrentScreen::Main => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('/') | KeyCode::Char('s') => {
                            app.searching = true;
                            app.search_term.clear();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.next_movie();
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.previous_movie();
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.next_page();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.previous_page();
                        }
                        KeyCode::Enter => {
                            app.open_selected();
                        }
                        _ => {}
                    },
                    CurrentScreen::Detail => match key.code {
                        // every close path runs the same cleanup
                        KeyCode::Esc | KeyCode::Char('x') => {
                            app.close_detail();
                        }
                        KeyCode::Char('t') | KeyCode::Char('w') => {
                            if app.trailer == TrailerView::Info {
                                app.watch_trailer();
                            }
                        }
                        KeyCode::Char('b') => {
                            if app.trailer != TrailerView::Info {
                                app.trailer_back();
                            }
                        }
                        _ => {}
                    },
                }
            }
            Event::Mouse(mouse) => {
                // Clicking outside the detail panel closes it, clicking
                // inside does not
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && app.current_screen == CurrentScreen::Detail
                {
                    let inside = app
                        .modal_area
                        .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                    if !inside {
                        app.close_detail();
                    }
                }
            }
            _ => {}
        }
    }
}
