//! Crash-safe replacement of a save file.
//!
//! Bytes go to a temp file in the destination directory which is then renamed
//! over the target, so a reader sees either the old record or the new one.
//! Where rename cannot replace an existing file, the old file is parked on a
//! `.swap` sibling for the duration of the replace; [`recover_interrupted_write`]
//! puts it back if the process died inside that window.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::sibling::sibling_path;

const SWAP_SUFFIX: &str = "swap";

/// How hard to push bytes to disk before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// fsync the file, then best-effort fsync its directory.
    #[default]
    Durable,
    /// Leave flushing to the OS.
    Fast,
}

pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with(path, bytes, SyncPolicy::default())
}

pub fn atomic_write_with(path: impl AsRef<Path>, bytes: &[u8], sync: SyncPolicy) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    if sync == SyncPolicy::Durable {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let swap = sibling_path(path, SWAP_SUFFIX);
        let _ = fs::remove_file(&swap);
        fs::rename(path, &swap)?;
        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&swap, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&swap) {
            tracing::warn!(path = %swap.display(), "Failed to remove swap file: {e}");
        }
    }

    if sync == SyncPolicy::Durable {
        sync_dir(dir);
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!(path = %dir.display(), "Directory sync failed: {e}");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

/// Restore a record left on its `.swap` sibling by an interrupted write.
///
/// Does nothing when the record itself exists.
pub fn recover_interrupted_write(path: &Path) {
    let swap = sibling_path(path, SWAP_SUFFIX);
    if path.exists() || !swap.exists() {
        return;
    }
    match fs::rename(&swap, path) {
        Ok(()) => tracing::warn!(path = %path.display(), "Restored record from interrupted write"),
        Err(e) => tracing::warn!(path = %path.display(), "Failed to restore swap file: {e}"),
    }
}
