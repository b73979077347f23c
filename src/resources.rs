//! Lookup of the audio and sheet files bundled alongside the songbook.
//!
//! Every song's `filename` is a resource key: `<key>.mp3` holds the
//! accompaniment and `<key>.pdf` the printed sheet, both in one flat resource
//! directory.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{MediaError, ResourceKind};
use crate::models::Song;

/// Name of the import source inside the resource directory.
pub const SONGS_CSV: &str = "songs.csv";

#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `<name>.<ext>` inside the bundle, returning it only when the
    /// file exists.
    pub fn locate(&self, name: &str, kind: ResourceKind) -> Result<PathBuf, MediaError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MediaError::EmptyFilename);
        }

        let path = self.root.join(format!("{name}.{}", kind.extension()));
        if path.is_file() {
            Ok(path)
        } else {
            warn!(path = %path.display(), "bundled resource missing");
            Err(MediaError::ResourceNotFound {
                name: name.to_string(),
                kind,
            })
        }
    }

    pub fn audio_for(&self, song: &Song) -> Result<PathBuf, MediaError> {
        self.locate(&song.filename, ResourceKind::Audio)
    }

    pub fn document_for(&self, song: &Song) -> Result<PathBuf, MediaError> {
        self.locate(&song.filename, ResourceKind::Document)
    }

    /// Hand the song's PDF sheet to the system document viewer.
    pub fn open_document(&self, song: &Song) -> Result<PathBuf, MediaError> {
        let path = self.document_for(song)?;
        open::that(&path).map_err(|err| MediaError::Viewer(err.to_string()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn song(filename: &str) -> Song {
        Song {
            id: 1,
            title: "Fort".into(),
            artist: String::new(),
            first_line: String::new(),
            filename: filename.into(),
            is_favorite: false,
        }
    }

    #[test]
    fn resolves_each_kind_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fort.mp3"), b"id3").unwrap();
        let bundle = ResourceBundle::new(dir.path());

        assert_eq!(
            bundle.audio_for(&song("fort")).unwrap(),
            dir.path().join("fort.mp3")
        );
        assert_eq!(
            bundle.document_for(&song("fort")),
            Err(MediaError::ResourceNotFound {
                name: "fort".into(),
                kind: ResourceKind::Document,
            })
        );
        assert_eq!(
            bundle.audio_for(&song("  ")),
            Err(MediaError::EmptyFilename)
        );
    }
}
