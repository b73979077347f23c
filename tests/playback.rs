use std::fs;
use std::time::Duration;

use songbook::error::ResourceKind;
use songbook::playback::SilentEngine;
use songbook::{MediaError, PlaybackController, PlaybackState, ResourceBundle, Song};
use tempfile::TempDir;

fn song(id: i64, filename: &str) -> Song {
    Song {
        id,
        title: format!("Song {id}"),
        artist: "Choir".into(),
        first_line: String::new(),
        filename: filename.into(),
        is_favorite: false,
    }
}

fn bundle_with(names: &[&str]) -> (TempDir, ResourceBundle) {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(format!("{name}.mp3")), b"ID3").unwrap();
    }
    let bundle = ResourceBundle::new(dir.path());
    (dir, bundle)
}

#[test]
fn blank_filename_fails_without_a_session() {
    let (_dir, bundle) = bundle_with(&[]);
    let mut player = PlaybackController::new(Box::new(SilentEngine), bundle);

    player.setup(&song(1, "   "));
    assert_eq!(player.state(), &PlaybackState::Failed(MediaError::EmptyFilename));
    assert!(!player.has_session());

    player.toggle();
    assert!(!player.is_playing());
}

#[test]
fn missing_audio_names_the_resource() {
    let (_dir, bundle) = bundle_with(&["present"]);
    let mut player = PlaybackController::new(Box::new(SilentEngine), bundle);

    player.setup(&song(1, "absent"));
    let PlaybackState::Failed(err) = player.state() else {
        panic!("expected a failed state, got {:?}", player.state());
    };
    assert_eq!(
        err,
        &MediaError::ResourceNotFound {
            name: "absent".into(),
            kind: ResourceKind::Audio,
        }
    );
    assert!(err.to_string().contains("absent.mp3"));
}

#[test]
fn transport_walks_setup_play_pause_stop() {
    let (_dir, bundle) = bundle_with(&["hymn"]);
    let mut player = PlaybackController::new(Box::new(SilentEngine), bundle);
    let hymn = song(7, "hymn");

    player.setup(&hymn);
    assert_eq!(player.state(), &PlaybackState::Setup(hymn.clone()));
    assert_eq!(player.elapsed(), Duration::ZERO);

    player.toggle();
    player.sync();
    assert_eq!(player.state(), &PlaybackState::Playing(hymn.clone()));

    player.toggle();
    player.sync();
    assert_eq!(player.state(), &PlaybackState::Paused(hymn.clone()));

    player.seek(Duration::from_secs(42));
    player.sync();
    assert_eq!(player.elapsed(), Duration::from_secs(42));
    assert_eq!(player.current_song(), Some(&hymn));

    player.stop();
    player.stop();
    assert_eq!(player.state(), &PlaybackState::Stopped);
    assert!(!player.has_session());
    assert_eq!(player.elapsed(), Duration::ZERO);
}

#[test]
fn setting_up_another_song_replaces_the_session() {
    let (_dir, bundle) = bundle_with(&["first", "second"]);
    let mut player = PlaybackController::new(Box::new(SilentEngine), bundle);

    player.setup(&song(1, "first"));
    player.play();
    player.setup(&song(2, "second"));

    assert_eq!(player.state(), &PlaybackState::Setup(song(2, "second")));
    assert_eq!(player.elapsed(), Duration::ZERO);

    player.setup(&song(3, "third"));
    assert!(matches!(player.state(), PlaybackState::Failed(_)));
    assert!(!player.has_session());
}
