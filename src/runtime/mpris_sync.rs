use std::sync::mpsc::Receiver;

use crate::mpris::MprisHandle;
use crate::player::{AudioOutput, PlayerController, PlayerEvent};

pub fn update_mpris<A: AudioOutput>(mpris: &MprisHandle, controller: &PlayerController<A>) {
    mpris.set_track_metadata(controller.now_playing().as_ref());
    mpris.set_playback(controller.status());
}

/// Mirrors controller changes into the media session.
pub struct MprisSync {
    events: Receiver<PlayerEvent>,
}

impl MprisSync {
    pub fn new(events: Receiver<PlayerEvent>) -> Self {
        Self { events }
    }

    /// Republish when a track, transport or playlist change arrived.
    /// Progress and volume changes are not part of the session state.
    pub fn sync<A: AudioOutput>(&self, mpris: &MprisHandle, controller: &PlayerController<A>) {
        let changed = self.events.try_iter().fold(false, |changed, event| {
            changed
                || matches!(
                    event,
                    PlayerEvent::TrackChanged(_)
                        | PlayerEvent::Playing(_)
                        | PlayerEvent::Paused
                        | PlayerEvent::PlaylistChanged { .. }
                )
        });
        if changed {
            update_mpris(mpris, controller);
        }
    }
}
