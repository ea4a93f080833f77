//! Durable settings persistence.
//!
//! [`FileStore`] keeps the officer settings as one flat JSON string map on
//! disk and writes through on every change, so a value handed to `set`
//! survives a process restart. Storage failures must never block the call
//! flow: a missing file is a fresh profile, an unreadable one degrades to
//! an empty store with a warning, and a failed write is logged and
//! retried on the next change.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use call_core::settings::SettingsStore;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file '{path}' is not a JSON string map: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write settings file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("settings store degraded to empty: {err}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> std::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let raw =
            serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, raw).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            warn!(key, "failed to persist settings change: {err}");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(err) = self.persist() {
                warn!(key, "failed to persist settings removal: {err}");
            }
        }
    }
}

fn read_entries(path: &Path) -> std::result::Result<BTreeMap<String, String>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Default per-user location of the settings file.
pub fn default_store_path() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("unable to resolve local app data dir")?;
    Ok(base.join("callscribe").join("settings.json"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
