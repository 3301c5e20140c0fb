//! JSON snapshot persistence for the habit collection.
//!
//! Read failures are never fatal: a missing or corrupt snapshot yields an
//! empty collection so the service always starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Habit;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Load habits from `path`. Absent, unreadable, and corrupt snapshots all
/// fall back to an empty collection; the failure is only logged.
pub fn load(path: &Path) -> Vec<Habit> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!("failed to read habit snapshot {}: {err}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(habits) => habits,
        Err(err) => {
            tracing::warn!("corrupt habit snapshot {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Serialize the full habit list to `path`.
pub fn save(path: &Path, habits: &[Habit]) -> Result<(), SnapshotError> {
    let encoded = serde_json::to_string_pretty(habits)?;
    fs::write(path, encoded).map_err(|source| SnapshotError::Write {
        path: path.to_owned(),
        source,
    })
}
