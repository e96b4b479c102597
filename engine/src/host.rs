//! Collaborators the editor drives.
//!
//! The editor never renders, reads keys or touches the photo library itself.
//! The host hands it a [`HostContext`] on every lifecycle call and the editor
//! talks to the host only through these traits.

use journal_types::{DescriptionView, ListRow, PhotoImage};

use crate::photo::PhotoReply;

/// Logical inputs the editor reacts to. The host decides which physical keys map to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Confirm,
    Cancel,
    Create,
    /// Tap to edit the description, hold to rename.
    Edit,
    /// Held while navigating to drag the selected entry along.
    Move,
    Delete,
    ToggleMore,
    /// Tap to choose a photo, hold to remove it.
    Photo,
    TogglePrompts,
}

impl Action {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Confirm,
        Self::Cancel,
        Self::Create,
        Self::Edit,
        Self::Move,
        Self::Delete,
        Self::ToggleMore,
        Self::Photo,
        Self::TogglePrompts,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Confirm => 0,
            Self::Cancel => 1,
            Self::Create => 2,
            Self::Edit => 3,
            Self::Move => 4,
            Self::Delete => 5,
            Self::ToggleMore => 6,
            Self::Photo => 7,
            Self::TogglePrompts => 8,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm",
            Self::Cancel => "Cancel",
            Self::Create => "New entry",
            Self::Edit => "Edit",
            Self::Move => "Move",
            Self::Delete => "Delete",
            Self::ToggleMore => "More to explore",
            Self::Photo => "Photo",
            Self::TogglePrompts => "Prompts",
        }
    }
}

/// Which input routing the host should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostInputMode {
    /// Journal is closed; keys belong to the host.
    #[default]
    Inactive,
    /// List navigation and journal commands.
    Browsing,
    /// Keys go to the text input; only confirm/cancel are interpreted.
    TextCapture,
    /// Another surface (the photo chooser) owns input.
    Suspended,
}

/// What a text edit is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// The name cell of the given list row.
    EntryName { row: usize },
    Description,
}

impl TextTarget {
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Description)
    }
}

/// Opaque identity of a host text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub u32);

pub trait ListDisplay {
    fn set_title(&mut self, title: &str);
    fn open(&mut self);
    fn close(&mut self);
    fn set_rows(&mut self, rows: Vec<ListRow>);
    fn selected_index(&self) -> usize;
    fn set_selected_index(&mut self, index: usize);
    /// Apply pending navigation to the highlighted row and return how far it
    /// moved. Zero when nothing happened since the last poll.
    fn poll_navigation(&mut self) -> isize;
    fn force_redraw(&mut self);
    fn set_description(&mut self, view: DescriptionView);
}

pub trait TextInput {
    /// Focus the widget on `target`, seeded with `initial`, caret at the end.
    fn enable(&mut self, target: TextTarget, initial: &str);
    /// Unfocus the widget and hand back whatever it holds.
    fn disable(&mut self) -> String;
    fn owns(&self, handle: WidgetHandle) -> bool;
}

/// Per-tick key state. All three answers refer to the current tick.
pub trait InputPoll {
    fn is_pressed(&self, action: Action) -> bool;
    fn is_newly_pressed(&self, action: Action) -> bool;
    fn is_newly_released(&self, action: Action) -> bool;
}

pub trait PhotoResolver {
    /// Show a chooser. The answer arrives later through `reply`; dropping it means "no choice".
    fn open_chooser(&mut self, current: Option<&str>, reply: PhotoReply);
    fn resolve(&self, reference: &str) -> Option<PhotoImage>;
}

pub trait HostControl {
    fn set_input_mode(&mut self, mode: HostInputMode);
    /// While locked the host must not pause or leave the journal on its own.
    fn set_pause_locked(&mut self, locked: bool);
}

/// Borrowed collaborators for one lifecycle call.
pub struct HostContext<'a> {
    pub list: &'a mut dyn ListDisplay,
    pub text: &'a mut dyn TextInput,
    pub input: &'a dyn InputPoll,
    pub photos: &'a mut dyn PhotoResolver,
    pub host: &'a mut dyn HostControl,
}
