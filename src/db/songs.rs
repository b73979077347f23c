use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::{SortKey, Song};

const SONG_COLUMNS: &str = "s.id, s.title, s.artist, s.first_line, s.filename, s.is_favorite";

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        artist: row.get(2)?,
        first_line: row.get(3)?,
        filename: row.get(4)?,
        is_favorite: row.get(5)?,
    })
}

/// Fields for a song that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct NewSong<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub first_line: &'a str,
    pub filename: &'a str,
}

/// Fetch songs ordered ascending by `key`, optionally restricted to one
/// category. Ordering is case-insensitive so "amazing" and "Amazing" land in
/// the same section; title and id break ties so the order is stable.
pub fn fetch_songs(conn: &Connection, key: SortKey, category_id: Option<i64>) -> Result<Vec<Song>> {
    let order = format!(
        "ORDER BY s.{} COLLATE NOCASE, s.title COLLATE NOCASE, s.id",
        key.column()
    );

    let songs = match category_id {
        Some(category_id) => {
            let sql = format!(
                "SELECT {SONG_COLUMNS}
                 FROM songs s
                 INNER JOIN song_categories sc ON sc.song_id = s.id
                 WHERE sc.category_id = ?1
                 {order}"
            );
            let mut stmt = conn
                .prepare(&sql)
                .context("failed to prepare category songs query")?;
            let rows = stmt
                .query_map([category_id], song_from_row)
                .context("failed to iterate category songs")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect category songs")?;
            rows
        }
        None => {
            let sql = format!("SELECT {SONG_COLUMNS} FROM songs s {order}");
            let mut stmt = conn
                .prepare(&sql)
                .context("failed to prepare all songs query")?;
            let rows = stmt
                .query_map([], song_from_row)
                .context("failed to iterate songs")?
                .collect::<Result<Vec<_>, _>>()
                .context("failed to collect songs")?;
            rows
        }
    };

    Ok(songs)
}

/// Load a single song, used to refresh the song view after a toggle.
pub fn fetch_song(conn: &Connection, id: i64) -> Result<Song> {
    let sql = format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?1");
    conn.query_row(&sql, [id], song_from_row)
        .map_err(|err| match err {
            rusqlite::Error::QueryReturnedNoRows => anyhow!("Song not found"),
            other => other.into(),
        })
        .context("failed to load song")
}

/// Number of stored songs. The importer checks this to decide whether it has
/// already run.
pub fn count_songs(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
        .context("failed to count songs")
}

/// Insert a new song with the favorite flag cleared and echo the hydrated
/// struct back.
pub fn create_song(conn: &Connection, new: &NewSong<'_>) -> Result<Song> {
    conn.execute(
        "INSERT INTO songs (title, artist, first_line, filename, is_favorite)
         VALUES (?1, ?2, ?3, ?4, 0)",
        params![new.title, new.artist, new.first_line, new.filename],
    )
    .context("failed to insert song")?;

    Ok(Song {
        id: conn.last_insert_rowid(),
        title: new.title.to_string(),
        artist: new.artist.to_string(),
        first_line: new.first_line.to_string(),
        filename: new.filename.to_string(),
        is_favorite: false,
    })
}

/// Permanently delete a song. Category links cascade; the categories stay.
pub fn delete_song(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM songs WHERE id = ?1", params![id])
        .context("failed to delete song")?;

    if deleted == 0 {
        Err(anyhow!("Song not found"))
    } else {
        Ok(())
    }
}

pub fn set_favorite(conn: &Connection, id: i64, favorite: bool) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE songs SET is_favorite = ?1 WHERE id = ?2",
            params![favorite, id],
        )
        .context("failed to update favorite flag")?;

    if updated == 0 {
        Err(anyhow!("Song not found"))
    } else {
        Ok(())
    }
}

/// Flip the favorite flag in the store and return the persisted value.
pub fn toggle_favorite(conn: &Connection, id: i64) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE songs SET is_favorite = NOT is_favorite WHERE id = ?1",
            params![id],
        )
        .context("failed to toggle favorite flag")?;

    if updated == 0 {
        return Err(anyhow!("Song not found"));
    }

    conn.query_row(
        "SELECT is_favorite FROM songs WHERE id = ?1",
        [id],
        |row| row.get(0),
    )
    .context("failed to read favorite flag")
}
