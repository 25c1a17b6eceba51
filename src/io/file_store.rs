//! File-backed preference store
//!
//! One file per key, `<dir>/<key>.json`. The directory is created on first
//! save. Keys contain user identities, so characters that are unsafe in file
//! names are replaced before building the path.

use crate::core::traits::PreferenceStore;
use crate::types::GridError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FilePreferenceStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, GridError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GridError::preference_store(
                key,
                format!("failed to read {}: {}", path.display(), e),
            )),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), GridError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            GridError::preference_store(
                key,
                format!("failed to create {}: {}", self.dir.display(), e),
            )
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| {
            GridError::preference_store(key, format!("failed to write {}: {}", path.display(), e))
        })?;
        tracing::debug!("Wrote preference '{}' to {}", key, path.display());
        Ok(())
    }
}
