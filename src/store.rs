//! Song store: loads and saves the playlist.
//!
//! The durable form is a JSON array of `{title, artist, audioUrl, imageUrl}`
//! records with placeholder references; the in-memory form is a list of
//! `Track`s with resolved references. Both directions fail soft.

#[cfg(test)]
pub(crate) mod memory;
mod record;
mod refs;
mod storage;

use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::library::{NewTrack, Track};

pub use record::SongRecord;
pub use refs::StorageRoots;
pub use storage::{FileStorage, Storage};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("playlist record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct SongStore {
    storage: Box<dyn Storage>,
    key: String,
    roots: StorageRoots,
}

impl SongStore {
    pub fn new(storage: Box<dyn Storage>, key: impl Into<String>, roots: StorageRoots) -> Self {
        Self {
            storage,
            key: key.into(),
            roots,
        }
    }

    /// Store backed by the file at `playlist_path`.
    pub fn open(playlist_path: &Path, roots: StorageRoots) -> Self {
        let dir = playlist_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let key = playlist_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "songs.json".to_string());
        Self::new(Box::new(FileStorage::new(dir)), key, roots)
    }

    /// Load the playlist. A missing or unreadable record yields an empty list.
    pub fn load(&self) -> Vec<Track> {
        match self.try_load() {
            Ok(tracks) => {
                info!("loaded {} track(s) from {}", tracks.len(), self.key);
                tracks
            }
            Err(e) => {
                warn!("could not load playlist {}, starting empty: {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Save `tracks`. Returns `false` on failure; the previous record is kept.
    pub fn save(&mut self, tracks: &[Track]) -> bool {
        match self.try_save(tracks) {
            Ok(()) => {
                debug!("saved {} track(s) to {}", tracks.len(), self.key);
                true
            }
            Err(e) => {
                warn!("could not save playlist {}: {e}", self.key);
                false
            }
        }
    }

    fn try_load(&self) -> Result<Vec<Track>, StoreError> {
        let Some(bytes) = self.storage.read(&self.key)? else {
            return Ok(Vec::new());
        };
        let records: Vec<SongRecord> = serde_json::from_slice(&bytes)?;
        Ok(records
            .into_iter()
            .filter_map(|r| self.resolve(r))
            .collect())
    }

    fn try_save(&mut self, tracks: &[Track]) -> Result<(), StoreError> {
        let records: Vec<SongRecord> = tracks.iter().map(|t| self.to_record(t)).collect();
        let bytes = serde_json::to_vec_pretty(&records)?;
        self.storage.write(&self.key, &bytes)?;
        Ok(())
    }

    /// Durable record -> in-memory track. Records without audio are dropped.
    pub fn resolve(&self, record: SongRecord) -> Option<Track> {
        if record.audio_url.trim().is_empty() {
            warn!(
                "dropping stored entry {:?} without audio reference",
                record.title.as_deref().unwrap_or_default()
            );
            return None;
        }
        let entry = NewTrack {
            audio: self.roots.resolve_audio(&record.audio_url),
            image: record.image_url.map(|i| self.roots.resolve_image(&i)),
            title: record.title,
            artist: record.artist,
        };
        Track::from_new(entry, None)
    }

    /// In-memory track -> durable record.
    pub fn to_record(&self, track: &Track) -> SongRecord {
        SongRecord {
            title: track.given.title.clone(),
            artist: track.given.artist.clone(),
            audio_url: self.roots.placeholder_audio(&track.audio),
            image_url: track
                .image
                .as_deref()
                .map(|i| self.roots.placeholder_image(i)),
        }
    }
}
