use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::store::StorageRoots;

use super::model::NewTrack;
use super::scan::read_tags;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{path} has no file name")]
    MissingFileName { path: PathBuf },
    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Copies picked files into the audio and artwork roots so every reference
/// the playlist holds can be written back in placeholder form.
pub struct Importer {
    music_dir: PathBuf,
    images_dir: PathBuf,
    roots: StorageRoots,
}

impl Importer {
    pub fn new(music_dir: &Path, images_dir: &Path) -> Self {
        Self {
            music_dir: music_dir.to_path_buf(),
            images_dir: images_dir.to_path_buf(),
            roots: StorageRoots::new(music_dir, images_dir),
        }
    }

    /// Import an audio file and return its resolved reference.
    pub fn import_audio(&self, path: &Path) -> Result<String, ImportError> {
        let name = copy_into(&self.music_dir, path)?;
        Ok(self.roots.audio_ref(&name))
    }

    /// Import an artwork file and return its resolved reference.
    pub fn import_image(&self, path: &Path) -> Result<String, ImportError> {
        let name = copy_into(&self.images_dir, path)?;
        Ok(self.roots.image_ref(&name))
    }

    /// Import `audio_path` and describe it as a playlist entry, taking title
    /// and artist from its tags when present.
    pub fn new_track(&self, audio_path: &Path, image: Option<String>) -> Result<NewTrack, ImportError> {
        let audio = self.import_audio(audio_path)?;
        let tags = read_tags(audio_path);
        Ok(NewTrack {
            audio,
            image,
            title: tags.title,
            artist: tags.artist,
        })
    }
}

/// Copy `src` into `dir` and return its name relative to `dir`.
///
/// Files already under `dir` are referenced in place. An existing file with the
/// same name and contents is reused; otherwise a `-N` suffix keeps names
/// distinct.
fn copy_into(dir: &Path, src: &Path) -> Result<String, ImportError> {
    if let Ok(rel) = src.strip_prefix(dir) {
        if !rel.as_os_str().is_empty() {
            return Ok(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    let file_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ImportError::MissingFileName {
            path: src.to_path_buf(),
        })?;

    let io_err = |source| ImportError::Io {
        path: src.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    let src_len = fs::metadata(src).map_err(io_err)?.len();

    let stem = Path::new(&file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());
    let ext = Path::new(&file_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut candidate = file_name.clone();
    let mut n = 1;
    loop {
        let target = dir.join(&candidate);
        match fs::metadata(&target) {
            Err(_) => {
                fs::copy(src, &target).map_err(io_err)?;
                debug!("imported {} as {}", src.display(), target.display());
                return Ok(candidate);
            }
            Ok(meta) => {
                if meta.len() == src_len && same_contents(src, &target).map_err(io_err)? {
                    debug!("reusing {} for {}", target.display(), src.display());
                    return Ok(candidate);
                }
                candidate = format!("{stem}-{n}{ext}");
                n += 1;
            }
        }
    }
}

fn same_contents(a: &Path, b: &Path) -> std::io::Result<bool> {
    Ok(fs::read(a)? == fs::read(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Importer) {
        let dir = tempdir().unwrap();
        let importer = Importer::new(&dir.path().join("music"), &dir.path().join("images"));
        (dir, importer)
    }

    #[test]
    fn import_audio_copies_into_music_root() {
        let (dir, importer) = setup();
        let src = dir.path().join("song.mp3");
        fs::write(&src, b"abc").unwrap();

        let reference = importer.import_audio(&src).unwrap();
        let expected = dir.path().join("music").join("song.mp3");
        assert_eq!(reference, expected.to_string_lossy());
        assert_eq!(fs::read(&expected).unwrap(), b"abc");
    }

    #[test]
    fn import_reuses_identical_file_and_suffixes_conflicts() {
        let (dir, importer) = setup();
        let a = dir.path().join("a").join("song.mp3");
        let b = dir.path().join("b").join("song.mp3");
        fs::create_dir_all(a.parent().unwrap()).unwrap();
        fs::create_dir_all(b.parent().unwrap()).unwrap();
        fs::write(&a, b"first").unwrap();
        fs::write(&b, b"second!").unwrap();

        let first = importer.import_audio(&a).unwrap();
        let again = importer.import_audio(&a).unwrap();
        let other = importer.import_audio(&b).unwrap();

        assert_eq!(first, again);
        assert!(other.ends_with("song-1.mp3"), "{other}");
        assert_eq!(
            fs::read(dir.path().join("music").join("song-1.mp3")).unwrap(),
            b"second!"
        );
    }

    #[test]
    fn same_name_and_size_with_different_bytes_is_not_reused() {
        let (dir, importer) = setup();
        let a = dir.path().join("a").join("song.mp3");
        let b = dir.path().join("b").join("song.mp3");
        fs::create_dir_all(a.parent().unwrap()).unwrap();
        fs::create_dir_all(b.parent().unwrap()).unwrap();
        fs::write(&a, b"aaaa").unwrap();
        fs::write(&b, b"bbbb").unwrap();

        let first = importer.import_audio(&a).unwrap();
        let other = importer.import_audio(&b).unwrap();

        assert_ne!(first, other);
        assert!(other.ends_with("song-1.mp3"), "{other}");
        let music = dir.path().join("music");
        assert_eq!(fs::read(music.join("song.mp3")).unwrap(), b"aaaa");
        assert_eq!(fs::read(music.join("song-1.mp3")).unwrap(), b"bbbb");
    }

    #[test]
    fn files_already_under_root_are_referenced_in_place() {
        let (dir, importer) = setup();
        let images = dir.path().join("images");
        fs::create_dir_all(&images).unwrap();
        let cover = images.join("cover.jpg");
        fs::write(&cover, b"jpg").unwrap();

        let reference = importer.import_image(&cover).unwrap();
        assert_eq!(reference, cover.to_string_lossy());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 1);
    }

    #[test]
    fn new_track_falls_back_to_empty_tags() {
        let (dir, importer) = setup();
        let src = dir.path().join("untagged.wav");
        fs::write(&src, b"not audio").unwrap();

        let entry = importer.new_track(&src, None).unwrap();
        assert!(entry.audio.ends_with("untagged.wav"));
        assert_eq!(entry.title, None);
        assert_eq!(entry.artist, None);
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let (dir, importer) = setup();
        let err = importer
            .import_audio(&dir.path().join("nope.mp3"))
            .unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
