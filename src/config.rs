//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to locate configuration, data and log directories.

mod load;
mod schema;

pub use load::default_state_dir;
pub use schema::*;
