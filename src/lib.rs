//! Core library surface for the songbook TUI.
//!
//! The `bin` target wires these pieces together; integration tests and other
//! tooling can reuse the store, importer, listing and playback layers without
//! the terminal front-end.
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod library;
pub mod logging;
pub mod models;
pub mod playback;
pub mod resources;
pub mod ui;

/// Persistence entry points used by `main.rs` during bootstrap.
pub use db::{open_store, seed_sample_songs};

pub use config::{Args, Config};
pub use error::{ImportError, MediaError};
pub use import::{import_file_if_needed, ImportReport};
pub use library::{SongList, SongSection};
pub use models::{Category, SortKey, Song};
pub use playback::{PlaybackController, PlaybackState};
pub use resources::ResourceBundle;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
