//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist cursor and
//! the notification line.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
