use anyhow::Result;
use rusqlite::Connection;

use crate::db::{fetch_categories_for_song, fetch_category_summaries};
use crate::library::{ListEntry, SongList};
use crate::models::{Category, CategorySummary, SortKey, Song};

/// Move `selected` by `offset` inside `0..len`, saturating at both ends.
fn step(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = selected as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}

/// What a row on the category screen opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CategoryChoice {
    AllSongs,
    Category(Category),
}

/// Landing screen: "All Songs" followed by every category.
pub(crate) struct CategoryScreen {
    pub(crate) summaries: Vec<CategorySummary>,
    pub(crate) selected: usize,
}

impl CategoryScreen {
    pub(crate) fn load(conn: &Connection) -> Result<Self> {
        Ok(Self {
            summaries: fetch_category_summaries(conn)?,
            selected: 0,
        })
    }

    /// Refresh counts after deletions, keeping the cursor in bounds.
    pub(crate) fn reload(&mut self, conn: &Connection) -> Result<()> {
        self.summaries = fetch_category_summaries(conn)?;
        self.selected = self.selected.min(self.summaries.len());
        Ok(())
    }

    /// Rows shown, counting the leading "All Songs" entry.
    pub(crate) fn row_count(&self) -> usize {
        self.summaries.len() + 1
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.row_count());
    }

    pub(crate) fn choice(&self) -> CategoryChoice {
        match self.selected.checked_sub(1) {
            None => CategoryChoice::AllSongs,
            Some(idx) => self
                .summaries
                .get(idx)
                .map(|s| CategoryChoice::Category(s.category.clone()))
                .unwrap_or(CategoryChoice::AllSongs),
        }
    }
}

/// Sectioned song list with a cursor over songs (headers are skipped).
pub(crate) struct SongListScreen {
    pub(crate) list: SongList,
    pub(crate) selected: usize,
}

impl SongListScreen {
    pub(crate) fn open(conn: &Connection, choice: CategoryChoice) -> Result<Self> {
        let category = match choice {
            CategoryChoice::AllSongs => None,
            CategoryChoice::Category(category) => Some(category),
        };
        Ok(Self {
            list: SongList::load(conn, SortKey::default(), category)?,
            selected: 0,
        })
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.list.len());
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.list.song_at(self.selected)
    }

    /// Cycle the sort key and re-fetch. The cursor follows the song it was on.
    pub(crate) fn cycle_sort(&mut self, conn: &Connection) -> Result<SortKey> {
        let focus = self.current_song().map(|s| s.id);
        let key = self.list.sort_key().next();
        self.list.resort(conn, key)?;
        self.focus(focus);
        Ok(key)
    }

    /// Re-fetch after a mutation, keeping the cursor on `focus` when it still
    /// exists.
    pub(crate) fn refresh(&mut self, conn: &Connection, focus: Option<i64>) -> Result<()> {
        self.list.reload(conn)?;
        self.focus(focus);
        Ok(())
    }

    fn focus(&mut self, focus: Option<i64>) {
        let position = focus.and_then(|id| self.list.songs().position(|s| s.id == id));
        self.selected = match position {
            Some(idx) => idx,
            None => self.selected.min(self.list.len().saturating_sub(1)),
        };
    }

    /// Row of the selected song in the header-interleaved entry list.
    pub(crate) fn selected_entry(&self, entries: &[ListEntry<'_>]) -> Option<usize> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches!(entry, ListEntry::Song(_)))
            .nth(self.selected)
            .map(|(row, _)| row)
    }
}

/// Detail view for one song while its accompaniment is loaded.
pub(crate) struct SongScreen {
    pub(crate) song: Song,
    pub(crate) categories: Vec<Category>,
}

impl SongScreen {
    pub(crate) fn load(conn: &Connection, song: Song) -> Result<Self> {
        let categories = fetch_categories_for_song(conn, song.id)?;
        Ok(Self { song, categories })
    }
}

/// Pending confirmation before a song is permanently deleted.
pub(crate) struct ConfirmSongDelete {
    pub(crate) song: Song,
}
