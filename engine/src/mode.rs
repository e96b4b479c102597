//! Lifecycle contract between a host and a custom mode it can switch into.

use std::time::Instant;

use crate::editor::EditorError;
use crate::host::HostContext;

pub trait Mode {
    fn name(&self) -> &'static str;

    /// Called once, before the first `enter`.
    fn initialize(&mut self, ctx: &mut HostContext<'_>);

    fn enter(&mut self, ctx: &mut HostContext<'_>);

    /// Leave the mode, resolving any edit in progress and flushing unsaved changes.
    fn exit(&mut self, ctx: &mut HostContext<'_>) -> Result<(), EditorError>;

    /// One frame. Never blocks.
    fn update(&mut self, ctx: &mut HostContext<'_>, now: Instant);

    /// Whether the host may switch to another mode right now.
    fn allow_swap(&self) -> bool;

    /// Whether the host's own cancel binding may close this mode right now.
    fn allow_cancel(&self) -> bool;
}
