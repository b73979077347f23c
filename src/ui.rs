//! Ratatui front-end. The screens nest the way a printed songbook is used:
//! pick a category, scan the sectioned index, then open one song to read its
//! sheet and play the accompaniment.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
