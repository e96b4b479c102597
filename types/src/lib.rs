//! Core domain types for the journal.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod text;
mod view;

pub use text::{split_fact_blocks, truncate_with_ellipsis};
pub use view::{BlockKind, DescriptionView, FactBlock, ListRow, PhotoImage, PhotoView};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label given to entries created from the list.
pub const DEFAULT_ENTRY_NAME: &str = "New Entry";

/// Text of the synthetic block appended when an entry has more to explore.
pub const MORE_TO_EXPLORE_TEXT: &str = "There's more to explore here.";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

// ============================================================================
// Entry
// ============================================================================

/// One journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default = "default_entry_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_more_to_explore: bool,
    #[serde(default)]
    pub photo_reference: Option<String>,
}

fn default_entry_name() -> String {
    DEFAULT_ENTRY_NAME.to_string()
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            name: default_entry_name(),
            description: String::new(),
            has_more_to_explore: false,
            photo_reference: None,
        }
    }
}

impl Entry {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Description paragraphs followed by the "more to explore" marker, if set.
    #[must_use]
    pub fn display_blocks(&self) -> Vec<FactBlock> {
        let mut blocks: Vec<FactBlock> = split_fact_blocks(&self.description)
            .into_iter()
            .map(FactBlock::fact)
            .collect();
        if self.has_more_to_explore {
            blocks.push(FactBlock::more_to_explore());
        }
        blocks
    }

    /// Flip the "more to explore" flag, returning the new value.
    pub fn toggle_more_to_explore(&mut self) -> bool {
        self.has_more_to_explore = !self.has_more_to_explore;
        self.has_more_to_explore
    }
}

// ============================================================================
// SaveData
// ============================================================================

/// The persisted record for one profile.
///
/// Decoding is lenient about missing fields: an absent `entries` list is empty
/// and an absent `showPrompts` is `true`. Anything that is not valid JSON of
/// this shape is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    #[serde(default = "default_true")]
    pub show_prompts: bool,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            show_prompts: true,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed journal record: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to encode journal record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SaveData {
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        serde_json::from_slice::<Self>(bytes).map_err(RecordError::Malformed)
    }

    pub fn encode(&self) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec_pretty(self).map_err(RecordError::Encode)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
