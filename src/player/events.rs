use std::sync::mpsc::{self, Receiver, Sender};

use crate::library::Track;

/// Metadata of the current track, as published to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NowPlaying {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub audio: String,
    pub image: Option<String>,
}

impl NowPlaying {
    pub fn new(index: usize, track: &Track) -> Self {
        Self {
            index,
            title: track.title.clone(),
            artist: track.artist.clone(),
            audio: track.audio.clone(),
            image: track.image.clone(),
        }
    }
}

/// State-change notifications emitted by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Tracks were added or removed; carries the new length.
    PlaylistChanged { len: usize },
    /// A different track became current; `None` clears displayed metadata.
    TrackChanged(Option<NowPlaying>),
    Playing(NowPlaying),
    Paused,
    Progress { position: f64, duration: Option<f64> },
    VolumeChanged { volume: f32, muted: bool },
    ModesChanged { repeat: bool, shuffle: bool },
    /// An unplayable track was dropped from the playlist.
    TrackRemoved { title: String },
}

/// Fan-out of events to every live subscriber.
#[derive(Default)]
pub(super) struct Subscribers {
    senders: Vec<Sender<PlayerEvent>>,
}

impl Subscribers {
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Deliver `event` to all subscribers, dropping those whose receiver is gone.
    pub fn emit(&mut self, event: PlayerEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
