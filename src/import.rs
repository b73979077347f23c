//! One-time bulk load of the songbook from a CSV resource.
//!
//! Column layout: `title, artist, first_line, filename, reference, categories`.
//! The reference column is ignored and `categories` is a colon separated list
//! of category names. The first line is a header.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    add_song_to_category, count_categories, count_songs, create_song, find_or_create_category,
    NewSong,
};
use crate::error::ImportError;

/// Rows with fewer columns than this are skipped as malformed.
pub const MIN_COLUMNS: usize = 6;

const TITLE: usize = 0;
const ARTIST: usize = 1;
const FIRST_LINE: usize = 2;
const FILENAME: usize = 3;
const CATEGORIES: usize = 5;

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// True when the store already held songs and nothing was read.
    pub already_loaded: bool,
    pub songs: usize,
    /// Categories created by this run (existing ones are reused).
    pub categories: usize,
    /// Malformed lines that were logged and skipped.
    pub skipped: usize,
}

/// Split one CSV line into trimmed fields. Commas inside double quotes do not
/// split, `""` inside quotes is a literal quote, and quote characters are
/// otherwise dropped. There are no other escapes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut buffer = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                buffer.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut buffer)),
            other => buffer.push(other),
        }
    }
    fields.push(buffer);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Split the categories column into trimmed, non-empty names.
pub fn category_names(column: &str) -> impl Iterator<Item = &str> {
    column.split(':').map(str::trim).filter(|name| !name.is_empty())
}

/// Read `path` and import it unless the store already has songs. A missing
/// or unreadable file is only an error when an import is actually needed.
pub fn import_file_if_needed(
    conn: &mut Connection,
    path: &Path,
) -> Result<ImportReport, ImportError> {
    if count_songs(conn)? > 0 {
        info!("songs already loaded, skipping CSV import");
        return Ok(ImportReport {
            already_loaded: true,
            ..ImportReport::default()
        });
    }

    let content = fs::read_to_string(path)?;
    import_if_needed(conn, &content)
}

/// Import `content` unless the store already has songs. All rows go into one
/// transaction that is committed at the end.
pub fn import_if_needed(
    conn: &mut Connection,
    content: &str,
) -> Result<ImportReport, ImportError> {
    if count_songs(conn)? > 0 {
        info!("songs already loaded, skipping CSV import");
        return Ok(ImportReport {
            already_loaded: true,
            ..ImportReport::default()
        });
    }

    let mut report = ImportReport::default();
    let tx = conn
        .transaction()
        .map_err(|err| ImportError::Store(err.into()))?;
    let categories_before = count_categories(&tx)?;

    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let cols = parse_csv_line(line);
        if cols.len() < MIN_COLUMNS {
            warn!(
                line = index + 1,
                expected = MIN_COLUMNS,
                found = cols.len(),
                "skipping malformed CSV row"
            );
            report.skipped += 1;
            continue;
        }

        let song = create_song(
            &tx,
            &NewSong {
                title: &cols[TITLE],
                artist: &cols[ARTIST],
                first_line: &cols[FIRST_LINE],
                filename: &cols[FILENAME],
            },
        )?;

        for name in category_names(&cols[CATEGORIES]) {
            let category = find_or_create_category(&tx, name)?;
            add_song_to_category(&tx, category.id, song.id)?;
        }

        debug!(title = %song.title, artist = %song.artist, "loaded song");
        report.songs += 1;
    }

    report.categories = count_categories(&tx)?.saturating_sub(categories_before);
    tx.commit().map_err(ImportError::Commit)?;
    info!(
        songs = report.songs,
        categories = report.categories,
        skipped = report.skipped,
        "CSV import committed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields_with_escaped_quotes() {
        let fields = parse_csv_line(r#"  "Hello, World" , "Say ""hi""",plain,,"#);
        assert_eq!(fields, ["Hello, World", "Say \"hi\"", "plain", "", ""]);
    }

    #[test]
    fn unterminated_quote_swallows_the_rest_of_the_line() {
        let fields = parse_csv_line(r#"a,"b,c"#);
        assert_eq!(fields, ["a", "b,c"]);
    }

    #[test]
    fn category_names_are_trimmed_and_blank_ones_dropped() {
        let names: Vec<_> = category_names(" Advent : :Lent:").collect();
        assert_eq!(names, ["Advent", "Lent"]);
    }
}
