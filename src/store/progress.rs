// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::TourId;

/// Storage key for the serialized completed-tour id array.
///
/// The backing storage is shared with the host shell (user flags and the like), so every
/// key this crate owns is namespaced under `cicerone/`.
pub const COMPLETED_TOURS_KEY: &str = "cicerone/completed_tours";

const STORAGE_FILENAME: &str = "cicerone-storage.json";

/// Durable key-value collaborator (a `localStorage`-equivalent).
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Trade-off between write speed and durability for [`FileStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    /// Atomic rename only; fast, survives process crashes.
    #[default]
    Fast,
    /// Additionally fsync file and directory; best-effort where supported.
    Durable,
}

/// Volatile backend for tests and throwaway demo runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed storage: one JSON object mapping keys to string values.
///
/// Writes go through a temp file plus atomic rename so a crash mid-write never corrupts
/// previously stored entries.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    durability: WriteDurability,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn storage_path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILENAME)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.storage_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StoreError::Io { path, source: err }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { path, source })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;

        let path = self.storage_path();
        let tmp_path = self.dir.join(format!("{STORAGE_FILENAME}.tmp"));
        let payload =
            serde_json::to_string_pretty(entries).expect("string map serializes to JSON");

        let mut file = fs::File::create(&tmp_path)
            .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
        file.write_all(payload.as_bytes())
            .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
        if self.durability == WriteDurability::Durable {
            file.sync_all()
                .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
        }
        drop(file);

        fs::rename(&tmp_path, &path)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;

        if self.durability == WriteDurability::Durable {
            // Directory sync is best-effort; not all platforms support it.
            if let Ok(dir) = fs::File::open(&self.dir) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }
}

/// Durable record of which tours the user has finished.
///
/// Read-through: every query re-reads the backend, so a fresh store instance over the
/// same storage observes the same truth (there is no in-process cache to invalidate).
#[derive(Debug, Clone)]
pub struct ProgressStore<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn is_complete(&self, tour_id: &TourId) -> bool {
        self.load_completed().contains(tour_id)
    }

    /// Idempotent durable write; re-marking an already-complete tour is a no-op.
    pub fn mark_complete(&mut self, tour_id: &TourId) -> Result<(), StoreError> {
        let mut completed = self.load_completed();
        if !completed.insert(tour_id.clone()) {
            return Ok(());
        }
        let ids: Vec<&str> = completed.iter().map(TourId::as_str).collect();
        let payload = serde_json::to_string(&ids).expect("id array serializes to JSON");
        self.storage.set(COMPLETED_TOURS_KEY, &payload)
    }

    pub fn all_completed(&self) -> BTreeSet<TourId> {
        self.load_completed()
    }

    fn load_completed(&self) -> BTreeSet<TourId> {
        let raw = match self.storage.get(COMPLETED_TOURS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeSet::new(),
            Err(err) => {
                warn!(error = %err, "progress storage unreadable; treating as empty");
                return BTreeSet::new();
            }
        };

        let ids: Vec<String> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(error = %err, "stored progress is not a JSON id array; treating as empty");
                return BTreeSet::new();
            }
        };

        ids.into_iter()
            .filter_map(|id| match TourId::new(id) {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(error = %err, "skipping invalid stored tour id");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, source: serde_json::Error },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Corrupt { path, .. } => path,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage I/O error at {}: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "storage file {} is not valid JSON: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests;
