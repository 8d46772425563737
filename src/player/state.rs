/// Coarse controller state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No tracks in the playlist.
    #[default]
    Empty,
    Paused,
    Playing,
}

/// Transient transport state. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    /// Index into the playlist; `None` exactly when the playlist is empty.
    pub current: Option<usize>,
    pub playing: bool,
    pub repeat: bool,
    pub shuffle: bool,
    /// Stored level in `[0, 1]`, kept while muted.
    pub volume: f32,
    pub muted: bool,
    /// Playback position in seconds.
    pub position: f64,
    /// Track length in seconds, once the output has reported it.
    pub duration: Option<f64>,
}

pub const DEFAULT_VOLUME: f32 = 0.7;

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            repeat: false,
            shuffle: false,
            volume: DEFAULT_VOLUME,
            muted: false,
            position: 0.0,
            duration: None,
        }
    }
}

impl PlayerState {
    pub fn status(&self) -> PlaybackState {
        match (self.current, self.playing) {
            (None, _) => PlaybackState::Empty,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Level actually sent to the output.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Position as a fraction of the duration; 0 while the duration is unknown.
    pub fn progress_fraction(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => (self.position / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Seconds left in the current track, when the duration is known.
    pub fn remaining(&self) -> Option<f64> {
        self.duration.map(|d| (d - self.position).max(0.0))
    }
}

/// Clamp a user-supplied level into `[0, 1]`; NaN counts as silence.
pub(crate) fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
