use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Open (or create) the SQLite file at `path`, creating parent directories as
/// needed, and run the lazy migrations.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
    ensure_schema(&conn)?;
    debug!(path = %path.display(), "song store ready");
    Ok(conn)
}

/// Throwaway store used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the tables if they are missing. `PRAGMA foreign_keys = ON` is set on
/// every connection so deleting a song cascades to its category links.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL DEFAULT '',
            first_line TEXT NOT NULL DEFAULT '',
            filename TEXT NOT NULL DEFAULT '',
            is_favorite INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("failed to create songs table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .context("failed to create categories table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS song_categories (
            category_id INTEGER NOT NULL,
            song_id INTEGER NOT NULL,
            PRIMARY KEY (category_id, song_id),
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE,
            FOREIGN KEY(song_id) REFERENCES songs(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create song_categories table")?;

    Ok(())
}
