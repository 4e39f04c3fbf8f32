mod footer;
mod loading;
mod movie_grid;
mod movie_modal;
mod notice;
mod pagination;
mod search_bar;
mod ui;

pub use ui::ui;
