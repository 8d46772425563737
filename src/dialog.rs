//! Native file dialogs. A closed dialog is `None`, never an error.

use std::path::PathBuf;

use log::debug;

/// Let the user pick one or more audio files.
pub fn pick_audio_files(extensions: &[String]) -> Option<Vec<PathBuf>> {
    debug!("opening audio file dialog");
    rfd::FileDialog::new()
        .set_title("Add songs")
        .add_filter("Audio Files", extensions)
        .pick_files()
        .filter(|paths| !paths.is_empty())
}

/// Optional artwork for the songs being added.
pub fn pick_artwork(extensions: &[String]) -> Option<PathBuf> {
    debug!("opening artwork dialog");
    rfd::FileDialog::new()
        .set_title("Artwork (cancel for default)")
        .add_filter("Images", extensions)
        .pick_file()
}

pub fn pick_folder() -> Option<PathBuf> {
    debug!("opening folder dialog");
    rfd::FileDialog::new().set_title("Add folder").pick_folder()
}
