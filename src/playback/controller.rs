use std::mem;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::MediaError;
use crate::models::Song;
use crate::resources::ResourceBundle;

use super::engine::{EngineEvent, MediaEngine, MediaSession};

/// Where the controller is in its lifecycle. `Setup` means a session is bound
/// and ready but has never played.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Setup(Song),
    Playing(Song),
    Paused(Song),
    Failed(MediaError),
}

/// Owns the single active playback session.
pub struct PlaybackController {
    engine: Box<dyn MediaEngine>,
    bundle: ResourceBundle,
    session: Option<Box<dyn MediaSession>>,
    state: PlaybackState,
    elapsed: Duration,
    duration: Duration,
}

impl PlaybackController {
    pub fn new(engine: Box<dyn MediaEngine>, bundle: ResourceBundle) -> Self {
        Self {
            engine,
            bundle,
            session: None,
            state: PlaybackState::Stopped,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left in the track, never negative.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing(_))
    }

    /// Song that is playing or paused. A session that is only set up has not
    /// started a song yet.
    pub fn current_song(&self) -> Option<&Song> {
        match &self.state {
            PlaybackState::Playing(song) | PlaybackState::Paused(song) => Some(song),
            PlaybackState::Stopped | PlaybackState::Setup(_) | PlaybackState::Failed(_) => None,
        }
    }

    /// Tear down the current session and bind a new one for `song`, ready to
    /// play. Lookup or engine failures leave the controller in `Failed` with
    /// no session.
    pub fn setup(&mut self, song: &Song) {
        self.stop();

        let path = match self.bundle.audio_for(song) {
            Ok(path) => path,
            Err(err) => return self.fail(err),
        };

        match self.engine.open(&path) {
            Ok(session) => {
                info!(song = %song.title, path = %path.display(), "playback session ready");
                self.session = Some(session);
                self.state = PlaybackState::Setup(song.clone());
            }
            Err(err) => self.fail(err),
        }
    }

    /// Start or resume playback from `Setup` or `Paused`.
    pub fn play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.state = match mem::replace(&mut self.state, PlaybackState::Stopped) {
            PlaybackState::Setup(song) | PlaybackState::Paused(song) => {
                session.play();
                debug!(song = %song.title, "playing");
                PlaybackState::Playing(song)
            }
            other => other,
        };
    }

    pub fn pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.state = match mem::replace(&mut self.state, PlaybackState::Stopped) {
            PlaybackState::Playing(song) => {
                session.pause();
                debug!(song = %song.title, "paused");
                PlaybackState::Paused(song)
            }
            other => other,
        };
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing(_) => self.pause(),
            PlaybackState::Paused(_) | PlaybackState::Setup(_) => self.play(),
            PlaybackState::Stopped | PlaybackState::Failed(_) => {}
        }
    }

    /// Halt playback and release the session. Safe to call in any state.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.halt();
            debug!("playback session released");
        }
        self.state = PlaybackState::Stopped;
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    /// Jump to `to`, clamped to the known duration. The state does not change.
    pub fn seek(&mut self, to: Duration) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let target = if self.duration > Duration::ZERO {
            to.min(self.duration)
        } else {
            to
        };
        session.seek(target);
        self.elapsed = target;
    }

    /// Seek relative to the current position.
    pub fn skip(&mut self, forward: bool, amount: Duration) {
        let target = if forward {
            self.elapsed.saturating_add(amount)
        } else {
            self.elapsed.saturating_sub(amount)
        };
        self.seek(target);
    }

    /// Apply everything the session queued since the last call. The UI loop
    /// calls this once per tick.
    pub fn sync(&mut self) {
        let events = match self.session.as_mut() {
            Some(session) => session.drain_events(),
            None => return,
        };

        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Elapsed(position) => self.elapsed = position,
            EngineEvent::DurationKnown(duration) => self.duration = duration,
            EngineEvent::RateChanged(rate) => self.reconcile_rate(rate),
            EngineEvent::PlayedToEnd => {
                if let Some(session) = self.session.as_mut() {
                    session.seek(Duration::ZERO);
                }
                self.elapsed = Duration::ZERO;
            }
        }
    }

    /// Follow rate changes the engine made on its own (interruptions, media
    /// keys) so the state matches what is audible.
    fn reconcile_rate(&mut self, rate: f32) {
        self.state = match mem::replace(&mut self.state, PlaybackState::Stopped) {
            PlaybackState::Playing(song) if rate == 0.0 => PlaybackState::Paused(song),
            PlaybackState::Paused(song) | PlaybackState::Setup(song) if rate > 0.0 => {
                PlaybackState::Playing(song)
            }
            other => other,
        };
    }

    fn fail(&mut self, err: MediaError) {
        warn!(error = %err, "playback setup failed");
        self.session = None;
        self.state = PlaybackState::Failed(err);
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}
