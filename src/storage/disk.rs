//! File-backed storage backend: one JSON document per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpasiError};
use crate::storage::StorageBackend;

/// Stores each key as `<dir>/<key>.json`. Writes go through a temporary file
/// and a rename, so a torn write never corrupts an existing document.
#[derive(Debug)]
pub struct DiskBackend {
    dir: PathBuf,
}

impl DiskBackend {
    /// Open (and create if needed) a backend rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| SpasiError::storage(format!("failed to create data directory: {e}")))?;
        Ok(Self { dir })
    }

    /// Open the backend at the default per-user data directory.
    pub fn open_default() -> Result<Self> {
        Self::new(Self::default_data_dir()?)
    }

    /// Default per-user data directory (`~/.spasi/cases`).
    pub fn default_data_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| SpasiError::configuration("unable to determine home directory"))?;
        Ok(home_dir.join(".spasi").join("cases"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for DiskBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SpasiError::storage(format!("failed to read {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)
            .map_err(|e| SpasiError::storage(format!("failed to write {key}: {e}")))?;
        fs::rename(&tmp, &path)
            .map_err(|e| SpasiError::storage(format!("failed to commit {key}: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SpasiError::storage(format!("failed to remove {key}: {e}"))),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key).exists())
    }
}
