//! Player controller: the playlist, transport state and the transitions
//! between them.
//!
//! The controller owns the playlist and `PlayerState` exclusively. It drives
//! an `AudioOutput`, persists every playlist mutation through the song store
//! and publishes `PlayerEvent`s to any number of subscribers.

mod controller;
mod events;
mod output;
mod state;
mod time;

pub use controller::{PlayerController, PlayerOptions};
pub use events::{NowPlaying, PlayerEvent};
pub use output::{AudioEvent, AudioOutput, PlaybackError};
pub use state::{PlaybackState, PlayerState};
pub use time::format_time;

#[cfg(test)]
pub(crate) mod fake;
