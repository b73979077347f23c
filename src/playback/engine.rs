use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::MediaError;

/// Notifications a session pushes to the controller. They are queued by the
/// session and drained on the UI loop, so every state change happens there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// Current playback position.
    Elapsed(Duration),
    /// Total length, once the engine knows it.
    DurationKnown(Duration),
    /// Playback rate changed, either because of our own play/pause or because
    /// something else (device loss, media keys) started or stopped the engine.
    RateChanged(f32),
    /// The end of the media was reached.
    PlayedToEnd,
}

/// One opened audio resource.
pub trait MediaSession {
    fn play(&mut self);
    fn pause(&mut self);
    /// Position playback at `position` exactly.
    fn seek(&mut self, position: Duration);
    /// Stop output and release the underlying resource.
    fn halt(&mut self);
    /// Take every event queued since the last call.
    fn drain_events(&mut self) -> Vec<EngineEvent>;
}

/// Factory for sessions.
pub trait MediaEngine {
    fn open(&mut self, path: &Path) -> Result<Box<dyn MediaSession>, MediaError>;
}

/// Engine without audio output. Sessions advance a wall clock while playing,
/// which keeps the transport controls and elapsed time meaningful on machines
/// built without the `rodio` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentEngine;

impl MediaEngine for SilentEngine {
    fn open(&mut self, path: &Path) -> Result<Box<dyn MediaSession>, MediaError> {
        File::open(path)
            .map_err(|err| MediaError::Engine(format!("failed to open {}: {err}", path.display())))?;
        Ok(Box::new(SilentSession::default()))
    }
}

#[derive(Debug, Default)]
struct SilentSession {
    /// Position accumulated before the current run.
    offset: Duration,
    /// Start of the current run; `None` while paused.
    started: Option<Instant>,
    reported_rate: f32,
    halted: bool,
}

impl SilentSession {
    fn position(&self) -> Duration {
        match self.started {
            Some(started) => self.offset + started.elapsed(),
            None => self.offset,
        }
    }

    fn rate(&self) -> f32 {
        if self.started.is_some() {
            1.0
        } else {
            0.0
        }
    }
}

impl MediaSession for SilentSession {
    fn play(&mut self) {
        if !self.halted && self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.offset = self.position();
        self.started = None;
    }

    fn seek(&mut self, position: Duration) {
        self.offset = position;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    fn halt(&mut self) {
        self.pause();
        self.offset = Duration::ZERO;
        self.halted = true;
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        if self.halted {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        let rate = self.rate();
        if rate != self.reported_rate {
            self.reported_rate = rate;
            events.push(EngineEvent::RateChanged(rate));
        }
        events.push(EngineEvent::Elapsed(self.position()));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_session_reports_rate_changes_once() {
        let mut session = SilentSession::default();
        assert_eq!(session.drain_events(), [EngineEvent::Elapsed(Duration::ZERO)]);

        session.play();
        let events = session.drain_events();
        assert_eq!(events[0], EngineEvent::RateChanged(1.0));
        assert!(!session
            .drain_events()
            .iter()
            .any(|e| matches!(e, EngineEvent::RateChanged(_))));

        session.pause();
        session.seek(Duration::from_secs(30));
        let events = session.drain_events();
        assert_eq!(
            events,
            [
                EngineEvent::RateChanged(0.0),
                EngineEvent::Elapsed(Duration::from_secs(30))
            ]
        );
    }

    #[test]
    fn opening_a_missing_file_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SilentEngine.open(&dir.path().join("nope.mp3"));
        assert!(matches!(result, Err(MediaError::Engine(_))));
    }
}
