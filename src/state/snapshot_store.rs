//! Durable key-value store for form snapshots
//!
//! Each key is one JSON file inside the store directory. The form keeps a
//! single snapshot under [`SUBMISSION_KEY`] while the user is away signing in.

use super::forms::FormValues;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding the in-progress submission
pub const SUBMISSION_KEY: &str = "app_submission_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode form snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Save the current values, replacing any earlier snapshot
    pub fn persist(&self, values: &FormValues) -> Result<(), StoreError> {
        let path = self.path_for(SUBMISSION_KEY);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let content = serde_json::to_string(values)?;
        let tmp = path.with_extension("json.tmp");
        write_atomic(&tmp, &content)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(fields = values.len(), "persisted submission snapshot");
        Ok(())
    }

    /// Read the snapshot without removing it
    pub fn peek(&self) -> Option<FormValues> {
        self.read(&self.path_for(SUBMISSION_KEY))
    }

    /// Read the snapshot and delete it, so it can be restored at most once.
    ///
    /// Returns empty values when nothing (or nothing readable) was stored.
    pub fn restore(&self) -> FormValues {
        let path = self.path_for(SUBMISSION_KEY);
        let values = self.read(&path);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("failed to clear submission snapshot {}: {e}", path.display());
            }
        }
        values.unwrap_or_default()
    }

    fn read(&self, path: &Path) -> Option<FormValues> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read submission snapshot {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(values) => Some(values),
            Err(e) => {
                tracing::warn!("ignoring malformed submission snapshot: {e}");
                None
            }
        }
    }
}

fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}
