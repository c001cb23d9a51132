//! Client-local persistence for the recent-search list.
//!
//! The stored document holds a single `recentSearches` key so the file stays readable
//! and can grow other keys without breaking older clients.

use crate::error::Result;
use crate::models::history::RecentSearches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

pub trait HistoryStore {
    fn load(&self) -> RecentSearches;
    fn save(&self, history: &RecentSearches) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(rename = "recentSearches", default)]
    recent_searches: Vec<String>,
}

/// JSON file on disk, the terminal counterpart of browser local storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileStore {
    fn load(&self) -> RecentSearches {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return RecentSearches::new(),
        };

        match serde_json::from_str::<StoredState>(&raw) {
            Ok(state) => RecentSearches::from_entries(state.recent_searches),
            Err(e) => {
                warn!(
                    "Ignoring unreadable history file {}: {}",
                    self.path.display(),
                    e
                );
                RecentSearches::new()
            }
        }
    }

    fn save(&self, history: &RecentSearches) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let state = StoredState {
            recent_searches: history.entries().to_vec(),
        };
        fs::write(&self.path, serde_json::to_string(&state)?)?;
        Ok(())
    }
}

/// Volatile store for sessions that should not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with_entries(entries: &[&str]) -> Self {
        Self {
            entries: Mutex::new(entries.iter().map(|e| e.to_string()).collect()),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    // A panic elsewhere never leaves the list half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Recent searches lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> RecentSearches {
        RecentSearches::from_entries(self.entries())
    }

    fn save(&self, history: &RecentSearches) -> Result<()> {
        *self.lock() = history.entries().to_vec();
        Ok(())
    }
}
