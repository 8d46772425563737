use std::fs::{self, OpenOptions};

use log::LevelFilter;

use crate::config::default_state_dir;

/// Route log output to `playdeck.log` in the state directory; the terminal
/// belongs to the UI. `RUST_LOG` overrides the default `info` level.
///
/// Logging stays off when the file cannot be opened.
pub fn init() {
    let Some(dir) = default_state_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("playdeck.log"))
    else {
        return;
    };

    let mut builder = colog::default_builder();
    builder
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never);
    let _ = builder.try_init();
}
