//! Persistence helpers around the embedded SQLite database. Every function in
//! this module wraps one query or migration so the listing, import and UI
//! layers can stay focused on their own state.

mod categories;
mod connection;
mod samples;
mod songs;

pub use categories::{
    add_song_to_category, count_categories, create_category, fetch_categories,
    fetch_categories_for_song, fetch_category_summaries, find_or_create_category,
};
pub use connection::{ensure_schema, open_in_memory, open_store};
pub use samples::seed_sample_songs;
pub use songs::{
    count_songs, create_song, delete_song, fetch_song, fetch_songs, set_favorite, toggle_favorite,
    NewSong,
};
