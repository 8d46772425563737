//! `rodio` implementation of the native audio primitive.
//!
//! Everything runs on the caller's thread; `rodio` mixes on its own output
//! thread. End-of-track and position changes are discovered by polling the
//! sink from the event loop.

mod sink;

use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::player::{AudioEvent, AudioOutput, PlaybackError};

use sink::create_sink_at;

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<String>,
    volume: f32,
    playing: bool,
    last_reported: Option<Duration>,
    events: Vec<AudioEvent>,
}

impl RodioOutput {
    /// Open the default output device.
    pub fn open() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            volume: 1.0,
            playing: false,
            last_reported: None,
            events: Vec::new(),
        })
    }

    /// Rebuild the sink for the current source at `start_at`, keeping the
    /// play/pause state. Used after the sink drained or a seek was refused.
    fn reopen_at(&mut self, start_at: Duration) -> Result<(), PlaybackError> {
        let source = self.source.clone().ok_or(PlaybackError::NotLoaded)?;
        let (new_sink, _) = create_sink_at(&self.stream, Path::new(&source), start_at)?;
        new_sink.set_volume(self.volume);
        if self.playing {
            new_sink.play();
        }
        if let Some(old) = self.sink.replace(new_sink) {
            old.stop();
        }
        Ok(())
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, source: &str) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.playing = false;
        self.last_reported = None;
        self.source = Some(source.to_string());

        match create_sink_at(&self.stream, Path::new(source), Duration::ZERO) {
            Ok((sink, duration)) => {
                debug!("loaded {source}");
                sink.set_volume(self.volume);
                self.sink = Some(sink);
                self.events.push(AudioEvent::MetadataLoaded(
                    duration.map(|d| d.as_secs_f64()),
                ));
            }
            Err(e) => {
                warn!("{e}");
                self.source = None;
                self.events.push(AudioEvent::LoadError {
                    source: source.to_string(),
                });
            }
        }
    }

    fn unload(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = None;
        self.playing = false;
        self.last_reported = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let drained = match &self.sink {
            Some(sink) => sink.empty(),
            None => return Err(PlaybackError::NotLoaded),
        };
        if drained {
            self.reopen_at(Duration::ZERO)?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        let target = Duration::from_secs_f64(seconds.max(0.0));
        let seeked = match &self.sink {
            Some(sink) if !sink.empty() => sink.try_seek(target).is_ok(),
            Some(_) => false,
            None => return,
        };
        if !seeked {
            if let Err(e) = self.reopen_at(target) {
                warn!("seek to {seconds:.1}s failed: {e}");
            }
        }
        self.last_reported = None;
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(sink) = &self.sink {
            sink.set_volume(level);
        }
    }

    fn poll_events(&mut self) -> Vec<AudioEvent> {
        if self.playing {
            if let Some(sink) = &self.sink {
                if sink.empty() {
                    self.playing = false;
                    self.events.push(AudioEvent::Ended);
                } else {
                    // Whole seconds are enough for the progress display.
                    let pos = sink.get_pos();
                    let secs = Duration::from_secs(pos.as_secs());
                    if self.last_reported != Some(secs) {
                        self.last_reported = Some(secs);
                        self.events.push(AudioEvent::TimeUpdate(pos.as_secs_f64()));
                    }
                }
            }
        }
        std::mem::take(&mut self.events)
    }
}
