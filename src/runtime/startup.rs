use std::fs;
use std::io;

use log::info;

use crate::config;
use crate::library::Importer;
use crate::player::PlayerOptions;
use crate::store::{SongStore, StorageRoots};

pub fn player_options(settings: &config::Settings) -> PlayerOptions {
    PlayerOptions {
        volume: settings.playback.volume,
        shuffle: settings.playback.shuffle,
        repeat: settings.playback.repeat,
        default_image: settings.library.default_image.clone(),
    }
}

/// Create the audio and artwork roots and the playlist's directory.
pub fn ensure_storage_dirs(storage: &config::StorageSettings) -> io::Result<()> {
    fs::create_dir_all(&storage.music_dir)?;
    fs::create_dir_all(&storage.images_dir)?;
    if let Some(parent) = storage.playlist_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn open_store(storage: &config::StorageSettings) -> SongStore {
    info!("playlist record: {}", storage.playlist_path.display());
    let roots = StorageRoots::new(&storage.music_dir, &storage.images_dir);
    SongStore::open(&storage.playlist_path, roots)
}

pub fn importer(storage: &config::StorageSettings) -> Importer {
    Importer::new(&storage.music_dir, &storage.images_dir)
}
