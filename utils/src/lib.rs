//! Shared infrastructure utilities for the journal.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)
//! - **`sibling`**: `.old` / `.corrupted` companion files next to a save

pub mod atomic_write;
pub mod sibling;

pub use atomic_write::{SyncPolicy, atomic_write, atomic_write_with, recover_interrupted_write};
pub use sibling::{copy_to_sibling, rename_to_sibling, sibling_path};
