use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use super::categories::{add_song_to_category, find_or_create_category};
use super::songs::{count_songs, create_song, NewSong};

/// Number of songs in the built-in sample set.
const SAMPLE_COUNT: usize = 10;

/// Fill an empty store with ten placeholder songs split across "Even" and
/// "Odd" categories, handy for trying the UI without a real resource bundle.
/// Returns the number of songs inserted (zero when the store already has
/// songs).
pub fn seed_sample_songs(conn: &mut Connection) -> Result<usize> {
    if count_songs(conn)? > 0 {
        return Ok(0);
    }

    let tx = conn
        .transaction()
        .context("failed to start sample transaction")?;
    let even = find_or_create_category(&tx, "Even")?;
    let odd = find_or_create_category(&tx, "Odd")?;

    for i in 0..SAMPLE_COUNT {
        let title = format!("{} Sample Song", i + 1);
        let artist = format!("{} Sample Artist", SAMPLE_COUNT - i);
        let sign = if i % 2 == 0 { 1 } else { -1 };
        let first_line = format!("line {sign}. This is the first line of sample song.");
        let filename = format!("sample_song_{}", i + 1);

        let song = create_song(
            &tx,
            &NewSong {
                title: &title,
                artist: &artist,
                first_line: &first_line,
                filename: &filename,
            },
        )?;
        let category = if i % 2 == 0 { &even } else { &odd };
        add_song_to_category(&tx, category.id, song.id)?;
    }

    tx.commit().context("failed to commit sample songs")?;
    info!(count = SAMPLE_COUNT, "seeded sample songs");
    Ok(SAMPLE_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_category_summaries, open_in_memory};

    #[test]
    fn seeds_once_and_splits_even_and_odd() {
        let mut conn = open_in_memory().unwrap();
        assert_eq!(seed_sample_songs(&mut conn).unwrap(), SAMPLE_COUNT);
        assert_eq!(seed_sample_songs(&mut conn).unwrap(), 0);

        let summaries = fetch_category_summaries(&conn).unwrap();
        let counts: Vec<_> = summaries
            .iter()
            .map(|s| (s.category.name.as_str(), s.song_count))
            .collect();
        assert_eq!(counts, [("Even", 5), ("Odd", 5)]);
    }
}
