//! Scripted `AudioOutput` for controller tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::output::{AudioEvent, AudioOutput, PlaybackError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Unload,
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f32),
}

#[derive(Default)]
pub struct Log {
    pub calls: Vec<Call>,
    pub pending: Vec<AudioEvent>,
    /// Sources whose load reports `LoadError`.
    pub broken: HashSet<String>,
    /// When set, `play` is rejected as if by an autoplay policy.
    pub reject_play: bool,
    loaded: Option<String>,
}

/// Clones share the same log so the test keeps a handle after handing one
/// to the controller.
#[derive(Clone, Default)]
pub struct FakeAudio {
    pub log: Rc<RefCell<Log>>,
}

impl FakeAudio {
    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().calls.clear();
    }

    pub fn break_source(&self, source: &str) {
        self.log.borrow_mut().broken.insert(source.to_string());
    }

    pub fn reject_play(&self, reject: bool) {
        self.log.borrow_mut().reject_play = reject;
    }

    pub fn push_event(&self, event: AudioEvent) {
        self.log.borrow_mut().pending.push(event);
    }

    pub fn loaded(&self) -> Option<String> {
        self.log.borrow().loaded.clone()
    }
}

impl AudioOutput for FakeAudio {
    fn load(&mut self, source: &str) {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Load(source.to_string()));
        if log.broken.contains(source) {
            log.loaded = None;
            log.pending.push(AudioEvent::LoadError {
                source: source.to_string(),
            });
        } else {
            log.loaded = Some(source.to_string());
        }
    }

    fn unload(&mut self) {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Unload);
        log.loaded = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut log = self.log.borrow_mut();
        log.calls.push(Call::Play);
        if log.loaded.is_none() {
            return Err(PlaybackError::NotLoaded);
        }
        if log.reject_play {
            return Err(PlaybackError::Device("autoplay blocked".into()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().calls.push(Call::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.log.borrow_mut().calls.push(Call::SetPosition(seconds));
    }

    fn set_volume(&mut self, level: f32) {
        self.log.borrow_mut().calls.push(Call::SetVolume(level));
    }

    fn poll_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.log.borrow_mut().pending)
    }
}
