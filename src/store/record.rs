use serde::{Deserialize, Serialize};

/// One durable playlist entry. References are always in placeholder form
/// (or pass-through URLs for artwork).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    /// Absent keys stay absent on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
