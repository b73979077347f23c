use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Category, CategorySummary};

/// Every category ordered by name.
pub fn fetch_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM categories ORDER BY name")
        .context("failed to prepare category query")?;

    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("failed to load categories")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect categories")?;

    Ok(categories)
}

/// Categories ordered by name together with how many songs each holds.
pub fn fetch_category_summaries(conn: &Connection) -> Result<Vec<CategorySummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.id, c.name, COUNT(sc.song_id)
             FROM categories c
             LEFT JOIN song_categories sc ON sc.category_id = c.id
             GROUP BY c.id, c.name
             ORDER BY c.name",
        )
        .context("failed to prepare category summary query")?;

    let summaries = stmt
        .query_map([], |row| {
            let count: i64 = row.get(2)?;
            Ok(CategorySummary {
                category: Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                },
                song_count: usize::try_from(count).unwrap_or_default(),
            })
        })
        .context("failed to iterate category summaries")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect category summaries")?;

    Ok(summaries)
}

/// Categories a song belongs to, ordered by name for the tag row in the song
/// view.
pub fn fetch_categories_for_song(conn: &Connection, song_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.id, c.name
             FROM categories c
             INNER JOIN song_categories sc ON sc.category_id = c.id
             WHERE sc.song_id = ?1
             ORDER BY c.name",
        )
        .context("failed to prepare song categories query")?;

    let categories = stmt
        .query_map([song_id], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("failed to iterate song categories")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect song categories")?;

    Ok(categories)
}

pub fn count_categories(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
        .context("failed to count categories")?;
    Ok(usize::try_from(count).unwrap_or_default())
}

pub fn create_category(conn: &Connection, name: &str) -> Result<Category> {
    conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name])
        .with_context(|| format!("failed to insert category '{name}'"))?;

    Ok(Category {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Return the category whose name matches exactly (case-sensitive), creating
/// it when no such row exists.
pub fn find_or_create_category(conn: &Connection, name: &str) -> Result<Category> {
    let existing = conn
        .query_row(
            "SELECT id, name FROM categories WHERE name = ?1 LIMIT 1",
            [name],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .context("failed to look up category")?;

    match existing {
        Some(category) => Ok(category),
        None => create_category(conn, name),
    }
}

/// Link a song to a category. `INSERT OR IGNORE` makes repeated links a no-op.
pub fn add_song_to_category(conn: &Connection, category_id: i64, song_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO song_categories (category_id, song_id) VALUES (?1, ?2)",
        params![category_id, song_id],
    )
    .context("failed to link song to category")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_song, delete_song, open_in_memory, NewSong};

    #[test]
    fn find_or_create_matches_names_exactly() {
        let conn = open_in_memory().unwrap();
        let first = find_or_create_category(&conn, "Advent").unwrap();
        let again = find_or_create_category(&conn, "Advent").unwrap();
        let other_case = find_or_create_category(&conn, "advent").unwrap();

        assert_eq!(first, again);
        assert_ne!(first.id, other_case.id);
        assert_eq!(fetch_categories(&conn).unwrap().len(), 2);
    }

    #[test]
    fn deleting_a_song_keeps_its_categories_but_drops_the_link() {
        let conn = open_in_memory().unwrap();
        let song = create_song(
            &conn,
            &NewSong {
                title: "Veni",
                ..NewSong::default()
            },
        )
        .unwrap();
        let category = find_or_create_category(&conn, "Advent").unwrap();
        add_song_to_category(&conn, category.id, song.id).unwrap();
        add_song_to_category(&conn, category.id, song.id).unwrap();

        let summaries = fetch_category_summaries(&conn).unwrap();
        assert_eq!(summaries[0].song_count, 1);

        delete_song(&conn, song.id).unwrap();
        let summaries = fetch_category_summaries(&conn).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].song_count, 0);
    }
}
