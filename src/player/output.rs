/// Notifications from the audio output, drained by the controller on each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    /// Current playback position in seconds.
    TimeUpdate(f64),
    /// The loaded track played to its end.
    Ended,
    /// `source` could not be opened or decoded.
    LoadError { source: String },
    /// Length of the loaded track, if the output could determine it.
    MetadataLoaded(Option<f64>),
}

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("nothing is loaded")]
    NotLoaded,
}

/// The native audio primitive.
///
/// Loading never fails synchronously: problems are reported later as
/// `AudioEvent::LoadError` from `poll_events`.
pub trait AudioOutput {
    /// Replace the loaded track with `source`, paused at position 0.
    fn load(&mut self, source: &str);
    /// Drop whatever is loaded.
    fn unload(&mut self);
    /// Start or resume playback of the loaded track.
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Move the playback position to `seconds`.
    fn set_position(&mut self, seconds: f64);
    /// Output level in `[0, 1]`.
    fn set_volume(&mut self, level: f32);
    fn poll_events(&mut self) -> Vec<AudioEvent>;
}
