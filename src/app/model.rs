//! Application view model: `App` and `Notice`.
//!
//! The `App` holds what only the UI cares about (playlist cursor and the
//! notification line). It follows the controller by folding its
//! `PlayerEvent`s, never by touching controller state.

use std::sync::mpsc::Receiver;

use crate::player::PlayerEvent;

/// A short message shown on the notification line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

/// The main view model.
pub struct App {
    pub selected: usize,
    pub follow_playback: bool,
    pub notice: Option<Notice>,
    events: Receiver<PlayerEvent>,
}

impl App {
    /// Create a new `App` fed by the controller subscription `events`.
    pub fn new(events: Receiver<PlayerEvent>, follow_playback: bool) -> Self {
        Self {
            selected: 0,
            follow_playback,
            notice: None,
            events,
        }
    }

    /// Show a notification.
    pub fn notify(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.notice = Some(Notice {
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Apply every pending controller event. Returns true if any arrived.
    pub fn drain_events(&mut self, playlist_len: usize) -> bool {
        let mut any = false;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event, playlist_len);
            any = true;
        }
        any
    }

    fn apply(&mut self, event: PlayerEvent, playlist_len: usize) {
        match event {
            PlayerEvent::PlaylistChanged { .. } => self.clamp_selection(playlist_len),
            PlayerEvent::TrackChanged(Some(now)) => {
                if self.follow_playback {
                    self.selected = now.index;
                }
            }
            PlayerEvent::TrackChanged(None) => self.selected = 0,
            PlayerEvent::Playing(now) => {
                self.notify("Now playing", format!("{} - {}", now.title, now.artist));
            }
            PlayerEvent::TrackRemoved { title } => {
                self.notify("Removed unplayable track", title);
            }
            PlayerEvent::Paused
            | PlayerEvent::Progress { .. }
            | PlayerEvent::VolumeChanged { .. }
            | PlayerEvent::ModesChanged { .. } => {}
        }
    }

    fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Move selection down, wrapping to the first row.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up, wrapping to the last row.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }
}
