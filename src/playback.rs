//! Audio accompaniment playback.
//!
//! [`PlaybackController`] owns at most one session at a time and exposes the
//! transport controls the song view binds to keys. Sessions come from a
//! [`MediaEngine`]; the controller never talks to an audio backend directly.

mod controller;
mod engine;
#[cfg(feature = "rodio")]
mod rodio_engine;

pub use controller::{PlaybackController, PlaybackState};
pub use engine::{EngineEvent, MediaEngine, MediaSession, SilentEngine};
#[cfg(feature = "rodio")]
pub use rodio_engine::RodioEngine;

/// Pick the engine for this build: real output when the `rodio` feature is on
/// and a device can be opened, otherwise the silent clock-driven engine.
pub fn default_engine() -> Box<dyn MediaEngine> {
    #[cfg(feature = "rodio")]
    {
        match RodioEngine::new() {
            Ok(engine) => return Box::new(engine),
            Err(err) => {
                tracing::warn!(error = %err, "audio output unavailable, falling back to silent playback")
            }
        }
    }

    Box::new(SilentEngine)
}
