//! Opening a file as a paused `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::probe_duration;
use crate::player::PlaybackError;

/// Create a paused `Sink` for the file at `path`, starting at `start_at`.
///
/// Also returns the track length: from the decoder when it knows it up
/// front, otherwise from the container tags.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let decode_err = |reason: String| PlaybackError::Decode {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| decode_err(e.to_string()))?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| decode_err(e.to_string()))?;
    let duration = decoder.total_duration().or_else(|| probe_duration(path));

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}
