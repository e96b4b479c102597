//! The durable key-value blob store the entry store persists through.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use journal_types::{RecordError, SaveData};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Result of looking up a profile's record.
#[derive(Debug)]
pub enum LoadedRecord {
    Found(SaveData),
    Absent,
    /// The record exists but does not decode.
    Corrupt { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Copied(PathBuf),
    /// The record disappeared since it was loaded; there was nothing to copy.
    NothingToCopy,
}

/// Storage the journal can load from and save to, keyed by profile id.
pub trait DurableStore {
    /// `Err` means the record exists but could not be read at all.
    fn load(&self, key: &str) -> Result<LoadedRecord, StoreError>;

    fn save(&self, key: &str, record: &SaveData) -> Result<(), StoreError>;

    /// Copy the current record onto its `.old` sibling.
    fn backup(&self, key: &str) -> Result<BackupOutcome, StoreError>;

    /// Move the current record onto its `.corrupted` sibling.
    fn quarantine(&self, key: &str) -> Result<PathBuf, StoreError>;
}
