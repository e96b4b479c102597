//! Filesystem-backed [`DurableStore`]: one JSON file per profile.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use journal_types::SaveData;
use journal_utils::{
    SyncPolicy, atomic_write_with, copy_to_sibling, recover_interrupted_write, rename_to_sibling,
};

use crate::durable::{BackupOutcome, DurableStore, LoadedRecord, StoreError};

pub const BACKUP_SUFFIX: &str = "old";
pub const CORRUPTED_SUFFIX: &str = "corrupted";

const RECORD_EXTENSION: &str = "json";

/// Records live at `<dir>/<profile>.json`.
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
    sync: SyncPolicy,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sync: SyncPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_sync(mut self, sync: SyncPolicy) -> Self {
        self.sync = sync;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{RECORD_EXTENSION}", sanitize_key(key)))
    }
}

/// Profile names come from outside; map each one to its own safe file stem.
///
/// Letters, digits, `-` and inner spaces pass through. Every other character,
/// `_` included, becomes `_XX` per UTF-8 byte, so distinct names never share
/// a record.
fn sanitize_key(key: &str) -> String {
    if key.is_empty() {
        return "_".to_string();
    }
    let last = key.chars().count() - 1;
    let mut stem = String::with_capacity(key.len());
    for (i, c) in key.chars().enumerate() {
        let inner_space = c == ' ' && i != 0 && i != last;
        if c.is_alphanumeric() || c == '-' || inner_space {
            stem.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                stem.push_str(&format!("_{byte:02X}"));
            }
        }
    }
    stem
}

impl DurableStore for FsStore {
    fn load(&self, key: &str) -> Result<LoadedRecord, StoreError> {
        let path = self.record_path(key);
        recover_interrupted_write(&path);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedRecord::Absent),
            Err(e) => return Err(StoreError::io("read", path, e)),
        };

        match SaveData::decode(&bytes) {
            Ok(data) => Ok(LoadedRecord::Found(data)),
            Err(e) => Ok(LoadedRecord::Corrupt {
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, record: &SaveData) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::io("create saves directory", &self.dir, e))?;

        let path = self.record_path(key);
        let bytes = record.encode()?;
        atomic_write_with(&path, &bytes, self.sync)
            .map_err(|e| StoreError::io("write", path, e))
    }

    fn backup(&self, key: &str) -> Result<BackupOutcome, StoreError> {
        let path = self.record_path(key);
        match copy_to_sibling(&path, BACKUP_SUFFIX) {
            Ok(sibling) => Ok(BackupOutcome::Copied(sibling)),
            Err(e) if e.kind() == ErrorKind::NotFound && !path.exists() => {
                Ok(BackupOutcome::NothingToCopy)
            }
            Err(e) => Err(StoreError::io("back up", path, e)),
        }
    }

    fn quarantine(&self, key: &str) -> Result<PathBuf, StoreError> {
        let path = self.record_path(key);
        rename_to_sibling(&path, CORRUPTED_SUFFIX).map_err(|e| StoreError::io("quarantine", path, e))
    }
}
