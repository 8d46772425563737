use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::LibrarySettings;
use crate::library::{Importer, scan_folder};
use crate::player::{AudioOutput, PlayerController};

/// Outcome of an add request, for the notification line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Added {
    pub added: usize,
    pub skipped: usize,
}

/// Import `files` (and the shared artwork, if any) and append them to the
/// playlist. Files that fail to import are skipped and counted.
///
/// With `autoplay`, adding to an empty playlist starts playback.
pub fn add_files<A: AudioOutput>(
    controller: &mut PlayerController<A>,
    importer: &Importer,
    files: &[PathBuf],
    artwork: Option<&Path>,
    autoplay: bool,
) -> Added {
    let image = artwork.and_then(|p| match importer.import_image(p) {
        Ok(reference) => Some(reference),
        Err(e) => {
            warn!("artwork not imported, using default: {e}");
            None
        }
    });

    let mut skipped = 0;
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        match importer.new_track(file, image.clone()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!("skipping {}: {e}", file.display());
                skipped += 1;
            }
        }
    }

    let was_empty = controller.playlist().is_empty();
    let added = controller.add_tracks(entries);
    if autoplay && was_empty && added > 0 {
        controller.play();
    }

    Added { added, skipped }
}

/// Add every audio file found in `dir`.
pub fn add_folder<A: AudioOutput>(
    controller: &mut PlayerController<A>,
    importer: &Importer,
    dir: &Path,
    library: &LibrarySettings,
    autoplay: bool,
) -> Added {
    let files = scan_folder(dir, library);
    info!("found {} audio file(s) in {}", files.len(), dir.display());
    add_files(controller, importer, &files, None, autoplay)
}

impl Added {
    pub fn summary(&self) -> String {
        match (self.added, self.skipped) {
            (0, 0) => "No audio files found".to_string(),
            (n, 0) => format!("{n} song(s) added"),
            (n, s) => format!("{n} song(s) added, {s} skipped"),
        }
    }
}
