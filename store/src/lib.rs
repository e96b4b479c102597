//! Durable journal storage.
//!
//! [`EntryStore`] owns the in-memory [`SaveData`] for one profile and knows how
//! to get it to and from a [`DurableStore`]:
//!
//! - a missing record starts an empty journal,
//! - a malformed record is moved aside to `<record>.corrupted` and an empty
//!   journal is used instead,
//! - the first save after loading an existing record copies it to
//!   `<record>.old` before overwriting it. Later saves in the same process do not.

mod durable;
mod fs_store;

pub use durable::{BackupOutcome, DurableStore, LoadedRecord, StoreError};
pub use fs_store::{BACKUP_SUFFIX, CORRUPTED_SUFFIX, FsStore};

use journal_types::SaveData;

pub struct EntryStore<D = FsStore> {
    data: SaveData,
    profile_id: String,
    durable: D,
    backup_pending: bool,
}

impl<D: DurableStore> EntryStore<D> {
    /// Load the journal for `profile_id`. Never fails: every outcome ends in a usable store.
    pub fn load(durable: D, profile_id: impl Into<String>) -> Self {
        let profile_id = profile_id.into();

        let (data, backup_pending) = match durable.load(&profile_id) {
            Ok(LoadedRecord::Found(data)) => {
                tracing::info!(
                    profile = %profile_id,
                    entries = data.entries.len(),
                    "Loaded journal"
                );
                (data, true)
            }
            Ok(LoadedRecord::Absent) => {
                tracing::info!(profile = %profile_id, "No journal yet; starting empty");
                (SaveData::default(), false)
            }
            Ok(LoadedRecord::Corrupt { reason }) => {
                tracing::error!(profile = %profile_id, "Journal record is malformed: {reason}");
                (SaveData::default(), !quarantine(&durable, &profile_id))
            }
            Err(e) => {
                tracing::error!(profile = %profile_id, "Journal record is unreadable: {e}");
                (SaveData::default(), !quarantine(&durable, &profile_id))
            }
        };

        Self {
            data,
            profile_id,
            durable,
            backup_pending,
        }
    }

    /// Write the journal out, backing up the pre-existing record first if this
    /// is the first save since it was loaded.
    ///
    /// If the backup fails nothing is written and the backup is retried by the
    /// next call.
    pub fn save(&mut self) -> Result<(), StoreError> {
        if self.backup_pending {
            match self.durable.backup(&self.profile_id)? {
                BackupOutcome::Copied(path) => {
                    tracing::info!(path = %path.display(), "Backed up previous journal");
                }
                BackupOutcome::NothingToCopy => {
                    tracing::warn!(
                        profile = %self.profile_id,
                        "Previous journal vanished before it could be backed up"
                    );
                }
            }
            self.backup_pending = false;
        }

        self.durable.save(&self.profile_id, &self.data)?;
        tracing::debug!(
            profile = %self.profile_id,
            entries = self.data.entries.len(),
            "Saved journal"
        );
        Ok(())
    }

    #[must_use]
    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SaveData {
        &mut self.data
    }

    #[must_use]
    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    #[must_use]
    pub fn backup_pending(&self) -> bool {
        self.backup_pending
    }

    #[must_use]
    pub fn durable(&self) -> &D {
        &self.durable
    }
}

/// Returns whether the bad record was moved out of the way.
///
/// When it could not be, the caller keeps the backup flag set so the first
/// save still copies the original bytes to `.old` before overwriting them.
fn quarantine<D: DurableStore>(durable: &D, profile_id: &str) -> bool {
    match durable.quarantine(profile_id) {
        Ok(path) => {
            tracing::error!(path = %path.display(), "Moved unusable journal aside; starting empty");
            true
        }
        Err(e) => {
            tracing::error!(profile = %profile_id, "Failed to quarantine journal record: {e}");
            false
        }
    }
}
