use std::path::PathBuf;

use serde::Deserialize;

use super::load::default_data_dir;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml` or `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root that `MUSIC_DIR/` placeholders resolve against. Added songs are
    /// copied here.
    pub music_dir: PathBuf,
    /// Root that `IMAGES_DIR/` placeholders resolve against.
    pub images_dir: PathBuf,
    /// The durable playlist record.
    pub playlist_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = default_data_dir().unwrap_or_else(|| PathBuf::from("playdeck-data"));
        Self {
            music_dir: base.join("music"),
            images_dir: base.join("images"),
            playlist_path: base.join("songs.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume in `[0, 1]`.
    pub volume: f32,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-one starts enabled.
    pub repeat: bool,
    /// Start playing right away when songs are added to an empty playlist.
    pub autoplay_on_add: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: false,
            autoplay_on_add: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions offered in the add dialog and picked up when adding a
    /// folder (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Extensions offered when picking artwork.
    pub image_extensions: Vec<String>,
    /// Whether adding a folder descends into subdirectories.
    pub recursive: bool,
    /// Artwork used for songs added without one. May be an external URL.
    pub default_image: Option<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "flac".into()],
            image_extensions: vec!["jpg".into(), "jpeg".into(), "png".into(), "webp".into()],
            recursive: false,
            default_image: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Which track fields make up a playlist row, and in what order.
    ///
    /// Example: ["artist", "title"]
    pub playlist_fields: Vec<TrackDisplayField>,
    /// Separator used to join `playlist_fields`.
    pub playlist_separator: String,
    /// Show the artwork reference of the current song.
    pub show_artwork: bool,
    /// Move the playlist cursor along with the current song.
    pub follow_playback: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ playdeck ~ ".to_string(),
            playlist_fields: vec![TrackDisplayField::Title, TrackDisplayField::Artist],
            playlist_separator: " - ".to_string(),
            show_artwork: true,
            follow_playback: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    #[serde(alias = "file", alias = "file-name")]
    Filename,
}
