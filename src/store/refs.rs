//! Placeholder <-> resolved reference rewriting.
//!
//! Durable records never hold absolute paths: audio references are written as
//! `MUSIC_DIR/<name>` and artwork as `IMAGES_DIR/<name>`. In memory the same
//! references are resolved against the configured roots. Matching is plain
//! string-prefix matching; anything that does not carry the expected prefix
//! passes through untouched.

use std::path::Path;

pub const MUSIC_PLACEHOLDER: &str = "MUSIC_DIR/";
pub const IMAGES_PLACEHOLDER: &str = "IMAGES_DIR/";

/// The two resource roots, kept as strings ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    music: String,
    images: String,
}

impl StorageRoots {
    pub fn new(music_dir: &Path, images_dir: &Path) -> Self {
        Self {
            music: root_prefix(&music_dir.to_string_lossy()),
            images: root_prefix(&images_dir.to_string_lossy()),
        }
    }

    /// Resolved reference for a file named `name` under the audio root.
    pub fn audio_ref(&self, name: &str) -> String {
        format!("{}{}", self.music, name)
    }

    /// Resolved reference for a file named `name` under the artwork root.
    pub fn image_ref(&self, name: &str) -> String {
        format!("{}{}", self.images, name)
    }

    pub fn resolve_audio(&self, stored: &str) -> String {
        swap_prefix(stored, MUSIC_PLACEHOLDER, &self.music)
    }

    pub fn resolve_image(&self, stored: &str) -> String {
        swap_prefix(stored, IMAGES_PLACEHOLDER, &self.images)
    }

    pub fn placeholder_audio(&self, resolved: &str) -> String {
        swap_prefix(resolved, &self.music, MUSIC_PLACEHOLDER)
    }

    pub fn placeholder_image(&self, resolved: &str) -> String {
        swap_prefix(resolved, &self.images, IMAGES_PLACEHOLDER)
    }
}

fn root_prefix(root: &str) -> String {
    format!("{}/", root.trim_end_matches('/'))
}

fn swap_prefix(value: &str, from: &str, to: &str) -> String {
    match value.strip_prefix(from) {
        Some(rest) => format!("{to}{rest}"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> StorageRoots {
        StorageRoots::new(Path::new("/u/music"), Path::new("/u/images/"))
    }

    #[test]
    fn resolves_placeholders_against_roots() {
        let r = roots();
        assert_eq!(r.resolve_audio("MUSIC_DIR/a.mp3"), "/u/music/a.mp3");
        assert_eq!(r.resolve_image("IMAGES_DIR/a.jpg"), "/u/images/a.jpg");
    }

    #[test]
    fn placeholder_and_resolve_are_inverse() {
        let r = roots();
        for stored in ["MUSIC_DIR/a.mp3", "MUSIC_DIR/sub dir/b c.ogg"] {
            assert_eq!(r.placeholder_audio(&r.resolve_audio(stored)), stored);
        }
        for resolved in ["/u/music/a.mp3", "/u/music/x/y.wav"] {
            assert_eq!(r.resolve_audio(&r.placeholder_audio(resolved)), resolved);
        }
        for stored in ["IMAGES_DIR/a.jpg", "https://example.com/default.png"] {
            assert_eq!(r.placeholder_image(&r.resolve_image(stored)), stored);
        }
        for resolved in ["/u/images/a.jpg", "https://example.com/default.png"] {
            assert_eq!(r.resolve_image(&r.placeholder_image(resolved)), resolved);
        }
    }

    #[test]
    fn foreign_references_pass_through() {
        let r = roots();
        assert_eq!(r.resolve_image("https://x/y.png"), "https://x/y.png");
        assert_eq!(r.placeholder_audio("/elsewhere/a.mp3"), "/elsewhere/a.mp3");
        assert_eq!(r.resolve_audio("/already/resolved.mp3"), "/already/resolved.mp3");
    }

    #[test]
    fn prefix_match_is_exact_not_path_aware() {
        let r = roots();
        // Sibling directory sharing the root's spelling is not under the root.
        assert_eq!(r.placeholder_audio("/u/musicians/a.mp3"), "/u/musicians/a.mp3");
        // No normalization of `..` or doubled separators.
        assert_eq!(
            r.placeholder_audio("/u/other/../music/a.mp3"),
            "/u/other/../music/a.mp3"
        );
    }

    #[test]
    fn resolving_twice_does_not_double_rewrite() {
        let r = roots();
        let once = r.resolve_audio("MUSIC_DIR/a.mp3");
        assert_eq!(r.resolve_audio(&once), once);
        let ph = r.placeholder_image("/u/images/a.jpg");
        assert_eq!(r.placeholder_image(&ph), ph);
    }
}
