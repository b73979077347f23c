//! Audio output through rodio. Each session owns a `Sink` on the shared output
//! stream; events are derived by watching the sink between UI ticks.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use crate::error::MediaError;

use super::engine::{EngineEvent, MediaEngine, MediaSession};

type FileDecoder = Decoder<BufReader<File>>;

fn decode(path: &Path) -> Result<FileDecoder, MediaError> {
    let file = File::open(path)
        .map_err(|err| MediaError::Engine(format!("failed to open {}: {err}", path.display())))?;
    Decoder::new(BufReader::new(file))
        .map_err(|err| MediaError::Engine(format!("failed to decode audio: {err}")))
}

pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn new() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| MediaError::Engine(format!("failed to create audio output: {err}")))?;
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl MediaEngine for RodioEngine {
    fn open(&mut self, path: &Path) -> Result<Box<dyn MediaSession>, MediaError> {
        let source = decode(path)?;
        let duration = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);
        debug!(path = %path.display(), ?duration, "rodio session opened");

        Ok(Box::new(RodioSession {
            sink,
            path: path.to_path_buf(),
            duration,
            duration_reported: false,
            reported_rate: 0.0,
            at_end: false,
        }))
    }
}

struct RodioSession {
    sink: Sink,
    path: PathBuf,
    duration: Option<Duration>,
    duration_reported: bool,
    reported_rate: f32,
    at_end: bool,
}

impl RodioSession {
    /// The sink drops a source once it has played out; queue the file again,
    /// paused, so the session can be rewound and replayed.
    fn reload(&mut self) {
        match decode(&self.path) {
            Ok(source) => {
                self.sink.pause();
                self.sink.append(source);
                self.at_end = false;
            }
            Err(err) => warn!(error = %err, "failed to reload audio after end of media"),
        }
    }

    fn rate(&self) -> f32 {
        if self.sink.is_paused() || self.sink.empty() {
            0.0
        } else {
            1.0
        }
    }
}

impl MediaSession for RodioSession {
    fn play(&mut self) {
        if self.sink.empty() {
            self.reload();
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, position: Duration) {
        if self.sink.empty() {
            self.reload();
        }
        if let Err(err) = self.sink.try_seek(position) {
            warn!(?position, error = %err, "seek failed");
        }
    }

    fn halt(&mut self) {
        self.sink.stop();
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        if !self.duration_reported {
            if let Some(duration) = self.duration {
                events.push(EngineEvent::DurationKnown(duration));
            }
            self.duration_reported = true;
        }

        let ended = self.sink.empty() && !self.at_end;
        if ended {
            self.at_end = true;
            events.push(EngineEvent::PlayedToEnd);
        }

        let rate = self.rate();
        if rate != self.reported_rate {
            self.reported_rate = rate;
            events.push(EngineEvent::RateChanged(rate));
        }

        // The position of a drained sink is stale once the controller rewinds.
        if !ended {
            events.push(EngineEvent::Elapsed(self.sink.get_pos()));
        }
        events
    }
}
