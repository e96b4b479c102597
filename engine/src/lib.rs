//! Journal editor engine.
//!
//! [`JournalEditor`] is a frame-driven state machine over an
//! [`EntryStore`](journal_store::EntryStore). It is the only thing that
//! mutates the entry list and the only authority on which input mode the host
//! should be in. The host drives it through the [`Mode`] lifecycle and hands
//! over its collaborators in a [`HostContext`] on every call.

mod edges;
mod editor;
mod host;
mod mode;
mod photo;

pub use editor::{EditorError, EditorOptions, EditorState, JOURNAL_TITLE, JournalEditor};
pub use host::{
    Action, HostContext, HostControl, HostInputMode, InputPoll, ListDisplay, PhotoResolver,
    TextInput, TextTarget, WidgetHandle,
};
pub use mode::Mode;
pub use photo::PhotoReply;

pub use journal_store::{DurableStore, EntryStore, FsStore, StoreError};
pub use journal_types::{DescriptionView, Entry, FactBlock, ListRow, PhotoImage, PhotoView};
