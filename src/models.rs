//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These types stay light-weight data holders so the persistence, listing
//! and playback layers can share them without conversions.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory representation of a song sheet. The struct mirrors one row of the
/// `songs` table; category links live in the `song_categories` join table and
/// are fetched separately when a view needs them.
pub struct Song {
    /// Primary key assigned by SQLite.
    pub id: i64,
    pub title: String,
    pub artist: String,
    /// Opening line of the lyrics, shown under the artist and usable as a sort
    /// key when people remember the words but not the title.
    pub first_line: String,
    /// Resource key shared by the bundled `<filename>.mp3` accompaniment and the
    /// `<filename>.pdf` sheet. Empty when the song has no bundled media.
    pub filename: String,
    pub is_favorite: bool,
}

impl Song {
    /// Compose a `Title - Artist` string that gracefully omits the hyphen if the
    /// artist is blank.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }

    pub fn has_media(&self) -> bool {
        !self.filename.trim().is_empty()
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named tag grouping songs (for example "Advent" or "Communion").
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Category row plus the number of songs linked to it, as shown on the
/// category screen.
pub struct CategorySummary {
    pub category: Category,
    pub song_count: usize,
}

/// Field used to order and section song lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Artist,
    FirstLine,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::Artist, SortKey::FirstLine];

    /// Column name in the `songs` table. Only ever interpolated from this fixed
    /// set, never from user input.
    pub(crate) fn column(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Artist => "artist",
            SortKey::FirstLine => "first_line",
        }
    }

    /// Read the field this key sorts by.
    pub fn field(self, song: &Song) -> &str {
        match self {
            SortKey::Title => &song.title,
            SortKey::Artist => &song.artist,
            SortKey::FirstLine => &song.first_line,
        }
    }

    /// Cycle to the next key; the song list binds this to a single shortcut.
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Title => SortKey::Artist,
            SortKey::Artist => SortKey::FirstLine,
            SortKey::FirstLine => SortKey::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Artist => "Artist",
            SortKey::FirstLine => "First line",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
