//! Companion files that live next to a save file.
//!
//! A sibling shares the full file name of its original plus a suffix, so
//! `saves/Hearthian.json` has `saves/Hearthian.json.old` and
//! `saves/Hearthian.json.corrupted`. Siblings are overwritten, never versioned.

use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// `path` with `.{suffix}` appended to its file name.
#[must_use]
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Copy `path` over its `suffix` sibling. Returns the sibling path.
pub fn copy_to_sibling(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let sibling = sibling_path(path, suffix);
    fs::copy(path, &sibling)?;
    Ok(sibling)
}

/// Move `path` onto its `suffix` sibling, replacing any stale sibling.
pub fn rename_to_sibling(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let sibling = sibling_path(path, suffix);
    // Windows refuses to rename over an existing file.
    match fs::remove_file(&sibling) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(path, &sibling)?;
    Ok(sibling)
}
