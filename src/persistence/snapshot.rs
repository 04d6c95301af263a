//! State file format and atomic snapshot I/O.
//!
//! # File Format
//!
//! ```text
//! {
//!   "features": ["<row id>", ...],
//!   "feature_statuses": {"<row id>": "label,label", ...},
//!   "boards": ["<row id>", ...],
//!   "schedules": ["<row id>", ...],
//!   "initialized": ["features", "boards", ...]
//! }
//! ```
//!
//! Every key is optional on load. `initialized` is an addition; files
//! written before it existed treat a collection with seen ids as initialized.
//!
//! # Atomic Writes
//!
//! Snapshots are written with write-to-temp-then-rename:
//! 1. Write to `<path>.tmp`
//! 2. fsync the file
//! 3. Rename to `<path>`
//! 4. fsync the directory
//!
//! Readers always see either the old or the new snapshot, never a partial write.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Ledger, TrackedState};
use crate::types::{CollectionKind, RowId};

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// The on-disk shape of the [`Ledger`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub features: BTreeSet<RowId>,

    #[serde(default)]
    pub feature_statuses: BTreeMap<RowId, String>,

    #[serde(default)]
    pub boards: BTreeSet<RowId>,

    #[serde(default)]
    pub schedules: BTreeSet<RowId>,

    /// Collections that have completed their bootstrap poll. Absent in
    /// older files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialized: Option<BTreeSet<CollectionKind>>,
}

impl From<&Ledger> for PersistedState {
    fn from(ledger: &Ledger) -> Self {
        let initialized = CollectionKind::ALL
            .into_iter()
            .filter(|kind| ledger.get(*kind).initialized)
            .collect();

        PersistedState {
            features: ledger.features.seen_ids.clone(),
            feature_statuses: ledger.features.status_by_id.clone(),
            boards: ledger.boards.seen_ids.clone(),
            schedules: ledger.schedules.seen_ids.clone(),
            initialized: Some(initialized),
        }
    }
}

impl From<PersistedState> for Ledger {
    fn from(persisted: PersistedState) -> Self {
        let initialized = |kind: CollectionKind, seen: &BTreeSet<RowId>| match &persisted
            .initialized
        {
            Some(set) => set.contains(&kind),
            None => !seen.is_empty(),
        };
        let features_initialized = initialized(CollectionKind::Feature, &persisted.features);
        let boards_initialized = initialized(CollectionKind::Board, &persisted.boards);
        let schedules_initialized = initialized(CollectionKind::Schedule, &persisted.schedules);

        Ledger {
            features: TrackedState {
                seen_ids: persisted.features,
                status_by_id: persisted.feature_statuses,
                initialized: features_initialized,
            },
            boards: TrackedState {
                seen_ids: persisted.boards,
                status_by_id: BTreeMap::new(),
                initialized: boards_initialized,
            },
            schedules: TrackedState {
                seen_ids: persisted.schedules,
                status_by_id: BTreeMap::new(),
                initialized: schedules_initialized,
            },
        }
    }
}

/// Saves a snapshot atomically to disk.
///
/// # Errors
///
/// Returns an error if any IO operation fails. The previous snapshot, if
/// any, is left intact in that case.
pub fn save_snapshot_atomic(path: &Path, state: &PersistedState) -> Result<()> {
    if let Some(parent) = non_empty_parent(path) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = tmp_path_for(path);
    let bytes = serde_json::to_vec_pretty(state)?;

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
    }

    std::fs::rename(&tmp_path, path)?;

    // The rename only survives power loss once the directory entry is synced.
    if let Some(parent) = non_empty_parent(path) {
        File::open(parent)?.sync_all()?;
    }

    Ok(())
}

/// Loads a snapshot from disk.
pub fn load_snapshot(path: &Path) -> Result<PersistedState> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Attempts to load a snapshot, returning None if the file doesn't exist.
///
/// Other errors (malformed JSON, unreadable file) are propagated.
pub fn try_load_snapshot(path: &Path) -> Result<Option<PersistedState>> {
    match load_snapshot(path) {
        Ok(state) => Ok(Some(state)),
        Err(SnapshotError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// `<path>.tmp`, keeping the original extension visible.
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    name.into()
}

/// The parent directory, or `None` for a bare file name.
fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
