//! Error types shared across the playback, resource and import layers.
//!
//! Store queries and UI glue use `anyhow` with context strings; the enums here
//! cover the failures that callers branch on.

use thiserror::Error;

/// Kind of bundled resource a song's filename resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Audio,
    Document,
}

impl ResourceKind {
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Audio => "mp3",
            ResourceKind::Document => "pdf",
        }
    }
}

/// Failures while resolving or opening a song's audio or sheet. The type is
/// `Clone` so it can be stored inside `PlaybackState::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("Song has an empty filename.")]
    EmptyFilename,

    #[error("Resource '{name}.{ext}' not found in the resource directory.", ext = .kind.extension())]
    ResourceNotFound { name: String, kind: ResourceKind },

    #[error("Media engine error: {0}")]
    Engine(String),

    #[error("Could not open the document viewer: {0}")]
    Viewer(String),
}

/// Failures that abort a CSV import. Malformed rows are not errors; they are
/// logged and counted in the import report.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read import source: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error during import: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("failed to commit imported songs: {0}")]
    Commit(#[source] rusqlite::Error),
}
