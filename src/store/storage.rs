use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Durable key/value persistence used by the song store.
pub trait Storage {
    /// Read the bytes stored under `key`, or `None` when nothing was written yet.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    /// Replace the bytes stored under `key`. Must leave the previous value
    /// intact when it fails.
    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Stores each key as a file in `dir`.
///
/// Writes go to a sibling `.tmp` file which is synced and then renamed over
/// the target, so a failed write never truncates the previous record.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let temp = temp_path(&target);

        let result = write_synced(&temp, bytes).and_then(|()| fs::rename(&temp, &target));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read("songs.json").unwrap(), None);
    }

    #[test]
    fn write_then_read_and_no_temp_left_behind() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        storage.write("songs.json", b"[1]").unwrap();
        storage.write("songs.json", b"[2]").unwrap();

        assert_eq!(storage.read("songs.json").unwrap(), Some(b"[2]".to_vec()));
        let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("songs.json")]);
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.write("songs.json", b"old").unwrap();

        // A directory squatting on the temp name makes the write fail.
        fs::create_dir(dir.path().join("songs.json.tmp")).unwrap();
        assert!(storage.write("songs.json", b"new").is_err());
        assert_eq!(storage.read("songs.json").unwrap(), Some(b"old".to_vec()));
    }
}
