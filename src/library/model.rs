use std::path::Path;

/// Artist shown when neither the caller nor the file tags provide one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One playlist entry, with references in resolved form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// Display title, never blank.
    pub title: String,
    /// Display artist, never blank.
    pub artist: String,
    /// Absolute, directly loadable audio locator. Never empty.
    pub audio: String,
    /// Artwork locator, or `None` when there is no artwork at all.
    pub image: Option<String>,
    /// Title and artist exactly as supplied; this is what gets persisted.
    pub given: GivenNames,
}

/// Title and artist as the caller or the durable record supplied them,
/// untrimmed, `None` when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GivenNames {
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Input for `PlayerController::add_tracks`.
///
/// Only `audio` is required; missing fields are filled in when the entry
/// becomes a `Track`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTrack {
    pub audio: String,
    pub image: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl NewTrack {
    pub fn new(audio: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            ..Self::default()
        }
    }
}

impl Track {
    /// Build a playlist entry from `entry`, substituting `default_image` when
    /// the entry carries no artwork. Returns `None` for an empty audio reference.
    pub fn from_new(entry: NewTrack, default_image: Option<&str>) -> Option<Self> {
        let audio = entry.audio.trim().to_string();
        if audio.is_empty() {
            return None;
        }

        let title = non_blank(entry.title.as_deref()).unwrap_or_else(|| title_from_ref(&audio));
        let artist =
            non_blank(entry.artist.as_deref()).unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        let image = non_blank(entry.image.as_deref()).or_else(|| default_image.map(str::to_string));

        Some(Self {
            title,
            artist,
            audio,
            image,
            given: GivenNames {
                title: entry.title,
                artist: entry.artist,
            },
        })
    }

    /// A track whose display names were also given explicitly.
    #[cfg(test)]
    pub fn named(
        title: impl Into<String>,
        artist: impl Into<String>,
        audio: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        let (title, artist) = (title.into(), artist.into());
        Self {
            given: GivenNames {
                title: Some(title.clone()),
                artist: Some(artist.clone()),
            },
            title,
            artist,
            audio: audio.into(),
            image,
        }
    }
}

/// Filename stem of a resource reference, used as a fallback title.
pub fn title_from_ref(reference: &str) -> String {
    Path::new(reference)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
