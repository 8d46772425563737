//! Playlist entries and the local files they come from.
//!
//! `Track` is the in-memory playlist record. The rest of this module turns
//! files picked by the user into `NewTrack` values: reading tags, scanning
//! folders and copying resources into the storage roots.

mod display;
mod import;
mod model;
mod scan;

pub use display::display_line;
pub use import::{ImportError, Importer};
pub use model::*;
pub use scan::{probe_duration, scan_folder};

#[cfg(test)]
mod tests;
