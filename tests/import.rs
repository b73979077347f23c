use std::fs;

use songbook::db::{
    count_songs, fetch_categories, fetch_categories_for_song, fetch_category_summaries,
    fetch_songs, open_in_memory,
};
use songbook::import::{import_file_if_needed, import_if_needed, ImportReport};
use songbook::{ImportError, SongList, SortKey};

const SONGS_CSV: &str = "\
title,artist,first line,filename,Reference,Indices
\"Abide With Me\",\"Monk, W. H.\",\"Abide with me; fast falls the eventide\",abide,H1,Evening:Funeral
Be Still My Soul,Sibelius,\"Be still, my soul: the Lord is on thy side\",be_still,H2, Comfort : Evening
O Come O Come,Traditional,\"O come, O come, \"\"Emmanuel\"\"\",veni,H3,Advent

broken,row,only
amazing grace,Newton,Amazing grace how sweet the sound,,H5,evening
\"\",,,,,
";

#[test]
fn imports_songs_and_categories_in_one_pass() {
    let mut conn = open_in_memory().unwrap();
    let report = import_if_needed(&mut conn, SONGS_CSV).unwrap();

    assert_eq!(
        report,
        ImportReport {
            already_loaded: false,
            songs: 5,
            categories: 5,
            skipped: 1,
        }
    );

    let names: Vec<_> = fetch_categories(&conn)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Advent", "Comfort", "Evening", "Funeral", "evening"]);

    let songs = fetch_songs(&conn, SortKey::Title, None).unwrap();
    let veni = songs.iter().find(|s| s.filename == "veni").unwrap();
    assert_eq!(veni.first_line, "O come, O come, \"Emmanuel\"");
    assert!(!veni.is_favorite);

    let abide = songs.iter().find(|s| s.filename == "abide").unwrap();
    assert_eq!(abide.artist, "Monk, W. H.");
    let tags: Vec<_> = fetch_categories_for_song(&conn, abide.id)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(tags, ["Evening", "Funeral"]);

    let evening = fetch_category_summaries(&conn)
        .unwrap()
        .into_iter()
        .find(|s| s.category.name == "Evening")
        .unwrap();
    assert_eq!(evening.song_count, 2);
}

#[test]
fn malformed_rows_create_nothing() {
    let mut conn = open_in_memory().unwrap();
    let csv = "title,artist,first,file,ref,cats\nonly,four,columns,Lonely\nfive,columns,here,x,y\n";
    let report = import_if_needed(&mut conn, csv).unwrap();

    assert_eq!(report.songs, 0);
    assert_eq!(report.skipped, 2);
    assert_eq!(count_songs(&conn).unwrap(), 0);
    assert!(fetch_categories(&conn).unwrap().is_empty());
}

#[test]
fn import_runs_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("songs.csv");
    fs::write(&path, SONGS_CSV).unwrap();

    let mut conn = open_in_memory().unwrap();
    let first = import_file_if_needed(&mut conn, &path).unwrap();
    assert_eq!(first.songs, 5);

    fs::remove_file(&path).unwrap();
    let second = import_file_if_needed(&mut conn, &path).unwrap();
    assert!(second.already_loaded);
    assert_eq!(count_songs(&conn).unwrap(), 5);
}

#[test]
fn missing_source_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut conn = open_in_memory().unwrap();
    let result = import_file_if_needed(&mut conn, &dir.path().join("songs.csv"));
    assert!(matches!(result, Err(ImportError::Io(_))));
    assert_eq!(count_songs(&conn).unwrap(), 0);
}

#[test]
fn imported_songs_section_into_a_partition_for_every_key() {
    let mut conn = open_in_memory().unwrap();
    import_if_needed(&mut conn, SONGS_CSV).unwrap();

    let mut list = SongList::load(&conn, SortKey::Title, None).unwrap();
    let keys: Vec<_> = list.sections().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["#", "A", "B", "O"]);

    let mut baseline: Vec<_> = list.songs().map(|s| s.id).collect();
    baseline.sort_unstable();

    for key in SortKey::ALL {
        list.resort(&conn, key).unwrap();
        let section_keys: Vec<_> = list.sections().iter().map(|s| s.key.clone()).collect();
        let mut sorted_keys = section_keys.clone();
        sorted_keys.sort();
        assert_eq!(section_keys, sorted_keys);

        let mut ids: Vec<_> = list.songs().map(|s| s.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, baseline);
    }

    list.resort(&conn, SortKey::Artist).unwrap();
    let keys: Vec<_> = list.sections().iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, ["#", "M", "N", "S", "T"]);
}

#[test]
fn category_filter_limits_the_listing() {
    let mut conn = open_in_memory().unwrap();
    import_if_needed(&mut conn, SONGS_CSV).unwrap();
    let evening = fetch_categories(&conn)
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Evening")
        .unwrap();

    let list = SongList::load(&conn, SortKey::Title, Some(evening)).unwrap();
    let titles: Vec<_> = list.songs().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Abide With Me", "Be Still My Soul"]);
    assert_eq!(list.title(), "Evening");
}
