//! Display-side types handed from the editor to whatever host renders it.
//!
//! Pure data: the editor fills these in, the host draws them.

use std::path::PathBuf;

use crate::MORE_TO_EXPLORE_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Fact,
    /// Synthetic trailing block for entries flagged "more to explore".
    MoreToExplore,
}

/// One paragraph of an entry description, rendered as its own element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl FactBlock {
    #[must_use]
    pub fn fact(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Fact,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn more_to_explore() -> Self {
        Self {
            kind: BlockKind::MoreToExplore,
            text: MORE_TO_EXPLORE_TEXT.to_string(),
        }
    }
}

/// One row of the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub label: String,
    pub more_to_explore: bool,
    pub has_photo: bool,
    /// Row is highlighted as about to be deleted.
    pub marked_for_deletion: bool,
}

/// A photo the resolver could find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoImage {
    pub reference: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// What the photo area should show for the selected entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotoView {
    /// Nothing is selected (empty journal).
    #[default]
    Hidden,
    /// Entry has no photo attached.
    Placeholder,
    Image(PhotoImage),
    /// Entry references a photo the resolver could not find.
    Missing { reference: String },
}

impl PhotoView {
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            PhotoView::Missing { reference } => Some(format!("Photo \"{reference}\" not found")),
            _ => None,
        }
    }
}

/// Description panel contents for the selected entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptionView {
    pub blocks: Vec<FactBlock>,
    pub photo: PhotoView,
}

impl DescriptionView {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
