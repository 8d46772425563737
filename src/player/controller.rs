use std::sync::mpsc::Receiver;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::library::{NewTrack, Track};
use crate::store::SongStore;

use super::events::{NowPlaying, PlayerEvent, Subscribers};
use super::output::{AudioEvent, AudioOutput, PlaybackError};
use super::state::{PlaybackState, PlayerState, clamp_level};

/// Startup defaults for a controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerOptions {
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: bool,
    /// Artwork substituted for added tracks that bring none.
    pub default_image: Option<String>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        let state = PlayerState::default();
        Self {
            volume: state.volume,
            shuffle: state.shuffle,
            repeat: state.repeat,
            default_image: None,
        }
    }
}

pub struct PlayerController<A: AudioOutput> {
    audio: A,
    store: SongStore,
    playlist: Vec<Track>,
    state: PlayerState,
    default_image: Option<String>,
    /// Set when a play request hit a track that had not loaded; the request is
    /// honoured again if that track gets dropped for a load error.
    play_pending: bool,
    subscribers: Subscribers,
    rng: StdRng,
}

impl<A: AudioOutput> PlayerController<A> {
    /// Build the controller and load the persisted playlist. The first track,
    /// if any, becomes current and is loaded paused.
    pub fn new(audio: A, store: SongStore, options: PlayerOptions) -> Self {
        Self::with_rng(audio, store, options, StdRng::from_os_rng())
    }

    pub fn with_rng(audio: A, store: SongStore, options: PlayerOptions, rng: StdRng) -> Self {
        let playlist = store.load();
        let mut controller = Self {
            audio,
            store,
            playlist,
            state: PlayerState {
                volume: clamp_level(options.volume),
                shuffle: options.shuffle,
                repeat: options.repeat,
                ..PlayerState::default()
            },
            default_image: options.default_image,
            play_pending: false,
            subscribers: Subscribers::default(),
            rng,
        };

        controller.audio.set_volume(controller.state.effective_volume());
        if !controller.playlist.is_empty() {
            controller.state.current = Some(0);
            controller.load_current();
        }
        controller
    }

    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.subscribers.subscribe()
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn status(&self) -> PlaybackState {
        self.state.status()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.and_then(|i| self.playlist.get(i))
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        let index = self.state.current?;
        self.playlist.get(index).map(|t| NowPlaying::new(index, t))
    }

    /// Append `entries` to the playlist and persist once.
    ///
    /// Entries without an audio reference are skipped. When the playlist was
    /// empty, the first added track becomes current (paused). Returns the
    /// number of tracks added.
    pub fn add_tracks(&mut self, entries: Vec<NewTrack>) -> usize {
        let was_empty = self.playlist.is_empty();
        let before = self.playlist.len();

        for entry in entries {
            match Track::from_new(entry, self.default_image.as_deref()) {
                Some(track) => self.playlist.push(track),
                None => warn!("skipping playlist entry without audio reference"),
            }
        }

        let added = self.playlist.len() - before;
        if added == 0 {
            return 0;
        }
        info!("added {added} track(s)");

        if was_empty {
            self.state.current = Some(0);
            self.load_current();
        }

        self.persist();
        self.emit(PlayerEvent::PlaylistChanged {
            len: self.playlist.len(),
        });
        added
    }

    /// Delete the entry at `index` and persist.
    ///
    /// If it was the current track, the track now at `min(index, len - 1)`
    /// is loaded (and resumed if playback was active); an emptied playlist
    /// clears the current track.
    pub fn remove_track(&mut self, index: usize) {
        let resume = self.state.playing;
        self.remove_track_inner(index, resume, false);
    }

    fn remove_track_inner(&mut self, index: usize, resume: bool, unplayable: bool) {
        if index >= self.playlist.len() {
            return;
        }
        let removed = self.playlist.remove(index);
        debug!("removed track {index} ({})", removed.title);

        self.persist();
        self.emit(PlayerEvent::PlaylistChanged {
            len: self.playlist.len(),
        });
        if unplayable {
            self.emit(PlayerEvent::TrackRemoved {
                title: removed.title,
            });
        }

        match self.state.current {
            Some(current) if current == index => {
                if self.playlist.is_empty() {
                    self.audio.pause();
                    self.state.current = None;
                    self.state.playing = false;
                    self.play_pending = false;
                    self.load_current();
                } else {
                    self.state.current = Some(index.min(self.playlist.len() - 1));
                    self.load_current();
                    if resume {
                        self.play();
                    }
                }
            }
            Some(current) if current > index => self.state.current = Some(current - 1),
            _ => {}
        }
    }

    /// Start playback of the current track. A rejected start is logged and
    /// leaves the state untouched.
    pub fn play(&mut self) {
        let Some(now) = self.now_playing() else {
            debug!("play ignored: playlist is empty");
            return;
        };
        if now.audio.is_empty() {
            return;
        }

        match self.audio.play() {
            Ok(()) => {
                self.state.playing = true;
                self.play_pending = false;
                self.emit(PlayerEvent::Playing(now));
            }
            Err(e) => {
                warn!("playback of {} did not start: {e}", now.title);
                self.play_pending = matches!(e, PlaybackError::NotLoaded);
            }
        }
    }

    pub fn pause(&mut self) {
        self.audio.pause();
        self.state.playing = false;
        self.play_pending = false;
        self.emit(PlayerEvent::Paused);
    }

    pub fn toggle_play(&mut self) {
        if self.state.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Make `index` current and play it.
    pub fn play_index(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }
        if self.state.current != Some(index) {
            self.state.current = Some(index);
            self.load_current();
        }
        self.play();
    }

    /// Advance to the next track, or to a different random one when shuffle
    /// is on. Playback resumes only if it was active before.
    pub fn next(&mut self) {
        let Some(current) = self.state.current else {
            return;
        };
        let len = self.playlist.len();
        let next = if self.state.shuffle && len > 1 {
            self.shuffle_pick(current, len)
        } else {
            (current + 1) % len
        };
        self.navigate(next);
    }

    /// Step back one track, wrapping to the end. Shuffle does not apply.
    pub fn previous(&mut self) {
        let Some(current) = self.state.current else {
            return;
        };
        let len = self.playlist.len();
        self.navigate((current + len - 1) % len);
    }

    fn navigate(&mut self, index: usize) {
        let was_playing = self.state.playing || self.play_pending;
        self.state.current = Some(index);
        self.load_current();
        if was_playing {
            self.play();
        }
    }

    /// Uniform pick from `[0, len)` other than `current`, by rejection sampling.
    fn shuffle_pick(&mut self, current: usize, len: usize) -> usize {
        loop {
            let candidate = self.rng.random_range(0..len);
            if candidate != current {
                return candidate;
            }
        }
    }

    /// Jump to `fraction` of the track. Ignored while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        if self.state.current.is_none() {
            return;
        }
        let Some(duration) = self.state.duration else {
            return;
        };
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let position = fraction * duration;
        self.state.position = position;
        self.audio.set_position(position);
        self.emit(PlayerEvent::Progress {
            position,
            duration: Some(duration),
        });
    }

    /// Move the position by `delta` seconds, via `seek`.
    pub fn scrub(&mut self, delta: f64) {
        if let Some(duration) = self.state.duration {
            self.seek((self.state.position + delta) / duration);
        }
    }

    /// Set the level (clamped to `[0, 1]`) and unmute.
    pub fn set_volume(&mut self, level: f32) {
        self.state.volume = clamp_level(level);
        self.state.muted = false;
        self.apply_volume();
    }

    pub fn change_volume(&mut self, delta: f32) {
        self.set_volume(self.state.volume + delta);
    }

    /// Flip mute; the stored level is kept.
    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.apply_volume();
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = !self.state.repeat;
        self.emit_modes();
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        self.emit_modes();
    }

    /// Drain the output's pending events and react to each.
    pub fn poll_audio(&mut self) {
        for event in self.audio.poll_events() {
            self.handle_audio_event(event);
        }
    }

    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::TimeUpdate(position) => {
                self.state.position = position.max(0.0);
                self.emit(PlayerEvent::Progress {
                    position: self.state.position,
                    duration: self.state.duration,
                });
            }
            AudioEvent::MetadataLoaded(duration) => {
                self.state.duration = duration.filter(|d| d.is_finite() && *d > 0.0);
                self.emit(PlayerEvent::Progress {
                    position: self.state.position,
                    duration: self.state.duration,
                });
            }
            AudioEvent::Ended => {
                if self.state.repeat {
                    self.state.position = 0.0;
                    self.audio.set_position(0.0);
                    self.play();
                } else {
                    self.next();
                }
            }
            AudioEvent::LoadError { source } => {
                let Some(index) = self.state.current else {
                    return;
                };
                if self.playlist[index].audio != source {
                    debug!("ignoring stale load error for {source}");
                    return;
                }
                warn!("dropping unplayable track {source}");
                let resume = self.state.playing || self.play_pending;
                self.state.playing = false;
                self.remove_track_inner(index, resume, true);
            }
        }
    }

    /// Load the current track into the output (or unload when there is none)
    /// and announce it. The new track starts paused at position 0.
    fn load_current(&mut self) {
        self.state.position = 0.0;
        self.state.duration = None;
        self.state.playing = false;
        self.play_pending = false;

        let now = self.now_playing();
        match &now {
            Some(n) => self.audio.load(&n.audio),
            None => self.audio.unload(),
        }
        self.emit(PlayerEvent::TrackChanged(now));
    }

    fn apply_volume(&mut self) {
        self.audio.set_volume(self.state.effective_volume());
        self.emit(PlayerEvent::VolumeChanged {
            volume: self.state.volume,
            muted: self.state.muted,
        });
    }

    fn persist(&mut self) {
        if !self.store.save(&self.playlist) {
            warn!("playlist change kept in memory only");
        }
    }

    fn emit_modes(&mut self) {
        self.emit(PlayerEvent::ModesChanged {
            repeat: self.state.repeat,
            shuffle: self.state.shuffle,
        });
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.subscribers.emit(event);
    }
}
