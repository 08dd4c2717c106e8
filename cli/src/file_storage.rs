//! File-backed [`SessionStorage`] for the terminal client.
//!
//! The file holds one flat JSON object (`{"token": "...", "userData": "..."}`),
//! the same entries the browser keeps in `localStorage`. Every call re-reads
//! the file, so two shells sharing it race with last-write-wins.

#[cfg(test)]
#[path = "file_storage_test.rs"]
mod file_storage_test;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs};

use session::{SessionStorage, StorageError};

const SESSION_DIR: &str = ".deployhub";
const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.deployhub/session.json`, when a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let home = env::var_os("HOME").filter(|home| !home.is_empty())?;
        Some(Path::new(&home).join(SESSION_DIR).join(SESSION_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                tracing::warn!("session file {} unreadable: {err}", self.path.display());
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!("session file {} is not a JSON object: {err}", self.path.display());
            BTreeMap::new()
        })
    }

    fn save(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let refused = |reason: String| StorageError::Write { key: key.to_owned(), reason };

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != ErrorKind::NotFound => Err(refused(err.to_string())),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| refused(err.to_string()))?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|err| refused(err.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, rendered).map_err(|err| refused(err.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|err| refused(err.to_string()))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        entries.insert(key.to_owned(), value.to_owned());
        self.save(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(key, &entries)
    }
}
