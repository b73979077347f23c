//! Sorted, sectioned song listings.
//!
//! A listing is always a fresh fetch from the store: changing the sort key or
//! the category filter re-runs the query and regroups the result. Sections are
//! keyed by the uppercased first character of the sort field so the list can
//! show "A", "B", ... headers the way a printed songbook index does.

use std::collections::BTreeMap;

use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

use crate::db::fetch_songs;
use crate::models::{Category, SortKey, Song};

/// Section used for songs whose sort field is blank.
pub const FALLBACK_SECTION: &str = "#";

/// Songs sharing the same leading character of the sort field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongSection {
    pub key: String,
    pub songs: Vec<Song>,
}

/// Section key for `song` under `key`: the first character of the field,
/// uppercased, or [`FALLBACK_SECTION`] when the field is empty.
pub fn section_key(song: &Song, key: SortKey) -> String {
    match key.field(song).trim_start().chars().next() {
        Some(first) => first.to_uppercase().collect(),
        None => FALLBACK_SECTION.to_string(),
    }
}

/// Group already-sorted songs into sections. Songs keep their relative order
/// inside a section and section keys come out in ascending order.
pub fn section_songs(songs: Vec<Song>, key: SortKey) -> Vec<SongSection> {
    let mut grouped: BTreeMap<String, Vec<Song>> = BTreeMap::new();
    for song in songs {
        grouped.entry(section_key(&song, key)).or_default().push(song);
    }

    grouped
        .into_iter()
        .map(|(key, songs)| SongSection { key, songs })
        .collect()
}

/// Entry in the flattened list the UI renders: a section header or a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEntry<'a> {
    Header(&'a str),
    Song(&'a Song),
}

/// The song list currently on screen: sort key, optional category filter and
/// the sections produced by the last fetch.
#[derive(Debug, Clone)]
pub struct SongList {
    key: SortKey,
    category: Option<Category>,
    sections: Vec<SongSection>,
}

impl SongList {
    /// Fetch and section songs for `category` (or every song when `None`).
    pub fn load(conn: &Connection, key: SortKey, category: Option<Category>) -> Result<Self> {
        let mut list = Self {
            key,
            category,
            sections: Vec::new(),
        };
        list.reload(conn)?;
        Ok(list)
    }

    /// Re-run the fetch with the current key and filter.
    pub fn reload(&mut self, conn: &Connection) -> Result<()> {
        let category_id = self.category.as_ref().map(|c| c.id);
        let songs = fetch_songs(conn, self.key, category_id)?;
        debug!(
            key = %self.key,
            category = ?self.category.as_ref().map(|c| c.name.as_str()),
            count = songs.len(),
            "song list fetched"
        );
        self.sections = section_songs(songs, self.key);
        Ok(())
    }

    /// Switch to a different sort key and fetch again. The previous key is
    /// kept when the fetch fails.
    pub fn resort(&mut self, conn: &Connection, key: SortKey) -> Result<()> {
        let previous = std::mem::replace(&mut self.key, key);
        if let Err(err) = self.reload(conn) {
            self.key = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn sort_key(&self) -> SortKey {
        self.key
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Title for the list header: the category name or "All Songs".
    pub fn title(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("All Songs")
    }

    pub fn sections(&self) -> &[SongSection] {
        &self.sections
    }

    /// Total number of songs across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.songs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Songs in display order, ignoring section boundaries.
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.sections.iter().flat_map(|s| s.songs.iter())
    }

    /// Song at `index` in display order.
    pub fn song_at(&self, index: usize) -> Option<&Song> {
        self.songs().nth(index)
    }

    /// Headers interleaved with songs, ready for rendering.
    pub fn entries(&self) -> Vec<ListEntry<'_>> {
        let mut entries = Vec::with_capacity(self.len() + self.sections.len());
        for section in &self.sections {
            entries.push(ListEntry::Header(&section.key));
            entries.extend(section.songs.iter().map(ListEntry::Song));
        }
        entries
    }
}
