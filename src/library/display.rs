use crate::config::TrackDisplayField;

use super::model::{Track, title_from_ref};

/// Build the playlist row text for `track` from the configured `fields`.
///
/// Blank parts are skipped; when nothing is left the title is used.
pub fn display_line(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => track.title.trim().to_string(),
            TrackDisplayField::Artist => track.artist.trim().to_string(),
            TrackDisplayField::Filename => title_from_ref(&track.audio),
        };
        if !part.is_empty() {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
