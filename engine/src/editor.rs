//! The journal editor state machine.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use journal_store::{DurableStore, EntryStore, FsStore, StoreError};
use journal_types::{DescriptionView, Entry, ListRow, PhotoView};

use crate::edges::ActionEdges;
use crate::host::{
    Action, HostContext, HostInputMode, PhotoResolver, TextInput, TextTarget, WidgetHandle,
};
use crate::mode::Mode;
use crate::photo::{PendingPhoto, PhotoPoll, PhotoRequests};

pub const JOURNAL_TITLE: &str = "Journal";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to save journal: {0}")]
    Save(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Disabled,
    Main,
    Renaming,
    EditingDescription,
    Deleting,
    ChoosingPhoto,
}

impl EditorState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Main => "Main",
            Self::Renaming => "Renaming",
            Self::EditingDescription => "EditingDescription",
            Self::Deleting => "Deleting",
            Self::ChoosingPhoto => "ChoosingPhoto",
        }
    }

    #[must_use]
    pub const fn input_mode(self) -> HostInputMode {
        match self {
            Self::Disabled => HostInputMode::Inactive,
            Self::Main | Self::Deleting => HostInputMode::Browsing,
            Self::Renaming | Self::EditingDescription => HostInputMode::TextCapture,
            Self::ChoosingPhoto => HostInputMode::Suspended,
        }
    }

    #[must_use]
    pub const fn is_text_edit(self) -> bool {
        matches!(self, Self::Renaming | Self::EditingDescription)
    }
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hold thresholds that separate a tap from a hold on shared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub rename_hold: Duration,
    pub delete_hold: Duration,
    pub remove_photo_hold: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            rename_hold: Duration::from_millis(300),
            delete_hold: Duration::from_millis(500),
            remove_photo_hold: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOutcome {
    Commit,
    Discard,
}

pub struct JournalEditor<D = FsStore> {
    store: EntryStore<D>,
    options: EditorOptions,
    state: EditorState,
    selected: usize,
    save_pending: bool,
    creating_new: bool,
    edges: ActionEdges,
    photo_requests: PhotoRequests,
    pending_photo: Option<PendingPhoto>,
}

impl<D: DurableStore> JournalEditor<D> {
    pub fn new(store: EntryStore<D>, options: EditorOptions) -> Self {
        Self {
            store,
            options,
            state: EditorState::Disabled,
            selected: 0,
            save_pending: false,
            creating_new: false,
            edges: ActionEdges::new(),
            photo_requests: PhotoRequests::default(),
            pending_photo: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    #[must_use]
    pub fn input_mode(&self) -> HostInputMode {
        self.state.input_mode()
    }

    /// Meaningless while the journal is empty.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.store.data().entries
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries().get(self.selected)
    }

    #[must_use]
    pub fn show_prompts(&self) -> bool {
        self.store.data().show_prompts
    }

    #[must_use]
    pub fn save_pending(&self) -> bool {
        self.save_pending
    }

    #[must_use]
    pub fn is_creating_new(&self) -> bool {
        self.creating_new
    }

    #[must_use]
    pub fn uses_text_input(&self) -> bool {
        self.state.is_text_edit()
    }

    /// Whether `handle` is the widget this editor is currently typing into.
    #[must_use]
    pub fn owns_widget(&self, text: &dyn TextInput, handle: WidgetHandle) -> bool {
        self.uses_text_input() && text.owns(handle)
    }

    #[must_use]
    pub fn options(&self) -> EditorOptions {
        self.options
    }

    #[must_use]
    pub fn store(&self) -> &EntryStore<D> {
        &self.store
    }

    #[must_use]
    pub fn rows(&self) -> Vec<ListRow> {
        let deleting = self.state == EditorState::Deleting;
        self.entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| ListRow {
                label: entry.name.clone(),
                more_to_explore: entry.has_more_to_explore,
                has_photo: entry.photo_reference.is_some(),
                marked_for_deletion: deleting && i == self.selected,
            })
            .collect()
    }

    #[must_use]
    pub fn description_view(&self, photos: &dyn PhotoResolver) -> DescriptionView {
        let Some(entry) = self.selected_entry() else {
            return DescriptionView::empty();
        };
        let photo = match &entry.photo_reference {
            None => PhotoView::Placeholder,
            Some(reference) => match photos.resolve(reference) {
                Some(image) => PhotoView::Image(image),
                None => PhotoView::Missing {
                    reference: reference.clone(),
                },
            },
        };
        DescriptionView {
            blocks: entry.display_blocks(),
            photo,
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render(&self, ctx: &mut HostContext<'_>) {
        ctx.list.set_rows(self.rows());
        ctx.list.set_selected_index(self.selected);
        self.render_description(ctx);
    }

    fn render_description(&self, ctx: &mut HostContext<'_>) {
        let view = self.description_view(&*ctx.photos);
        ctx.list.set_description(view);
    }

    fn clamp_selection(&mut self) {
        let len = self.entries().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn selected_entry_mut(&mut self) -> Option<&mut Entry> {
        let selected = self.selected;
        self.store.data_mut().entries.get_mut(selected)
    }

    // ------------------------------------------------------------------
    // Main
    // ------------------------------------------------------------------

    fn update_main(&mut self, ctx: &mut HostContext<'_>) {
        if self.handle_navigation(ctx) {
            return;
        }

        if self.edges.newly_pressed(Action::TogglePrompts) {
            self.toggle_prompts(ctx);
            return;
        }

        if self.edges.newly_pressed(Action::Create) {
            self.create_entry(ctx);
            return;
        }

        if self.entries().is_empty() {
            return;
        }

        let options = self.options;
        if self.edges.held_for(Action::Edit, options.rename_hold) {
            self.begin_text_edit(ctx, EditorState::Renaming);
        } else if self.edges.tapped(Action::Edit, options.rename_hold) {
            self.begin_text_edit(ctx, EditorState::EditingDescription);
        } else if self.edges.newly_pressed(Action::ToggleMore) {
            self.toggle_more_to_explore(ctx);
        } else if self.edges.held_for(Action::Photo, options.remove_photo_hold) {
            self.remove_photo(ctx);
        } else if self.edges.tapped(Action::Photo, options.remove_photo_hold) {
            self.begin_photo_choice(ctx);
        } else if self.edges.newly_pressed(Action::Delete) {
            self.state = EditorState::Deleting;
            ctx.list.set_rows(self.rows());
        }
    }

    /// Returns true when an entry was moved, which ends the tick.
    fn handle_navigation(&mut self, ctx: &mut HostContext<'_>) -> bool {
        if ctx.list.poll_navigation() == 0 {
            return false;
        }

        let len = self.entries().len();
        if len == 0 {
            self.selected = 0;
            return false;
        }

        let target = ctx.list.selected_index().min(len - 1);
        if target == self.selected {
            return false;
        }

        if ctx.input.is_pressed(Action::Move) && len > 1 {
            let entries = &mut self.store.data_mut().entries;
            let entry = entries.remove(self.selected);
            entries.insert(target, entry);
            tracing::debug!(from = self.selected, to = target, "Moved entry");
            self.selected = target;
            self.save_pending = true;
            self.render(ctx);
            return true;
        }

        self.selected = target;
        self.render_description(ctx);
        false
    }

    fn toggle_prompts(&mut self, ctx: &mut HostContext<'_>) {
        let data = self.store.data_mut();
        data.show_prompts = !data.show_prompts;
        self.save_pending = true;
        ctx.list.force_redraw();
    }

    fn create_entry(&mut self, ctx: &mut HostContext<'_>) {
        let entries = &mut self.store.data_mut().entries;
        let index = if entries.is_empty() {
            0
        } else {
            (self.selected + 1).min(entries.len())
        };
        entries.insert(index, Entry::default());
        tracing::debug!(index, "Created entry");

        self.selected = index;
        self.creating_new = true;
        self.save_pending = true;
        self.render(ctx);
        self.begin_text_edit(ctx, EditorState::Renaming);
    }

    fn toggle_more_to_explore(&mut self, ctx: &mut HostContext<'_>) {
        if let Some(entry) = self.selected_entry_mut() {
            entry.toggle_more_to_explore();
            self.save_pending = true;
            self.render(ctx);
        }
    }

    fn remove_photo(&mut self, ctx: &mut HostContext<'_>) {
        let removed = self
            .selected_entry_mut()
            .and_then(|entry| entry.photo_reference.take());
        if let Some(reference) = removed {
            tracing::debug!(%reference, "Removed photo");
            self.save_pending = true;
            self.render(ctx);
        }
    }

    // ------------------------------------------------------------------
    // Text editing
    // ------------------------------------------------------------------

    fn begin_text_edit(&mut self, ctx: &mut HostContext<'_>, state: EditorState) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let (target, initial) = match state {
            EditorState::Renaming => (
                TextTarget::EntryName { row: self.selected },
                entry.name.clone(),
            ),
            _ => (TextTarget::Description, entry.description.clone()),
        };

        ctx.text.enable(target, &initial);
        if !self.state.is_text_edit() {
            ctx.host.set_input_mode(HostInputMode::TextCapture);
            ctx.host.set_pause_locked(true);
        }
        self.state = state;
    }

    fn update_text_edit(&mut self, ctx: &mut HostContext<'_>) {
        if self.edges.newly_pressed(Action::Cancel) {
            self.finish_text_edit(ctx, EditOutcome::Discard, true);
        } else if self.edges.newly_pressed(Action::Confirm) {
            self.finish_text_edit(ctx, EditOutcome::Commit, true);
        }
    }

    /// Close the text widget and apply or drop its contents.
    ///
    /// With `chain` set, finishing the name of a freshly created entry moves
    /// straight on to its description.
    fn finish_text_edit(&mut self, ctx: &mut HostContext<'_>, outcome: EditOutcome, chain: bool) {
        let finished = self.state;
        let text = ctx.text.disable();

        if outcome == EditOutcome::Commit {
            self.commit_text(finished, text);
        }

        if chain && finished == EditorState::Renaming && self.creating_new {
            ctx.list.set_rows(self.rows());
            self.begin_text_edit(ctx, EditorState::EditingDescription);
            return;
        }

        if self.creating_new {
            self.creating_new = false;
            self.save_pending = true;
        }

        ctx.host.set_pause_locked(false);
        ctx.host.set_input_mode(HostInputMode::Browsing);
        self.state = EditorState::Main;
        self.render(ctx);
    }

    fn commit_text(&mut self, finished: EditorState, text: String) {
        let Some(entry) = self.selected_entry_mut() else {
            return;
        };
        match finished {
            EditorState::Renaming => {
                if text.trim().is_empty() {
                    tracing::debug!("Ignoring blank entry name");
                    return;
                }
                entry.name = text;
            }
            EditorState::EditingDescription => entry.description = text,
            _ => return,
        }
        self.save_pending = true;
    }

    // ------------------------------------------------------------------
    // Deleting
    // ------------------------------------------------------------------

    fn update_deleting(&mut self, ctx: &mut HostContext<'_>) {
        if self.edges.newly_pressed(Action::Cancel) {
            self.state = EditorState::Main;
            ctx.list.set_rows(self.rows());
            return;
        }

        let hold = self.options.delete_hold;
        if self.edges.held_for(Action::Delete, hold) || self.edges.held_for(Action::Confirm, hold) {
            self.delete_selected(ctx);
        }
    }

    fn delete_selected(&mut self, ctx: &mut HostContext<'_>) {
        let selected = self.selected;
        let entries = &mut self.store.data_mut().entries;
        if selected < entries.len() {
            let removed = entries.remove(selected);
            tracing::debug!(index = selected, name = %removed.name, "Deleted entry");
            self.save_pending = true;
        }
        self.clamp_selection();
        self.state = EditorState::Main;
        self.render(ctx);
    }

    // ------------------------------------------------------------------
    // Choosing a photo
    // ------------------------------------------------------------------

    fn begin_photo_choice(&mut self, ctx: &mut HostContext<'_>) {
        let current = self
            .selected_entry()
            .and_then(|entry| entry.photo_reference.clone());
        let (reply, pending) = self.photo_requests.request();
        self.pending_photo = Some(pending);
        self.state = EditorState::ChoosingPhoto;

        ctx.list.close();
        ctx.host.set_input_mode(HostInputMode::Suspended);
        ctx.photos.open_chooser(current.as_deref(), reply);
    }

    fn update_choosing_photo(&mut self, ctx: &mut HostContext<'_>) {
        let poll = match self.pending_photo.as_mut() {
            Some(pending) => pending.poll(),
            None => {
                tracing::warn!("Choosing a photo with no request in flight");
                PhotoPoll::Abandoned
            }
        };

        match poll {
            PhotoPoll::Waiting => {}
            PhotoPoll::Chosen(choice) => {
                self.pending_photo = None;
                if let Some(reference) = choice {
                    self.set_photo(reference);
                }
                self.return_from_chooser(ctx);
            }
            PhotoPoll::Abandoned => {
                self.pending_photo = None;
                self.return_from_chooser(ctx);
            }
        }
    }

    fn set_photo(&mut self, reference: String) {
        let Some(entry) = self.selected_entry_mut() else {
            return;
        };
        if entry.photo_reference.as_deref() != Some(reference.as_str()) {
            tracing::debug!(%reference, "Attached photo");
            entry.photo_reference = Some(reference);
            self.save_pending = true;
        }
    }

    fn return_from_chooser(&mut self, ctx: &mut HostContext<'_>) {
        self.state = EditorState::Main;
        ctx.list.open();
        ctx.host.set_input_mode(HostInputMode::Browsing);
        self.render(ctx);
    }

    // ------------------------------------------------------------------
    // Lifecycle helpers
    // ------------------------------------------------------------------

    /// Bring any sub-state back to `Main`, discarding in-flight work.
    fn resolve_sub_state(&mut self, ctx: &mut HostContext<'_>) {
        match self.state {
            EditorState::Renaming | EditorState::EditingDescription => {
                self.finish_text_edit(ctx, EditOutcome::Discard, false);
            }
            EditorState::Deleting => {
                self.state = EditorState::Main;
            }
            EditorState::ChoosingPhoto => {
                // Dropping the receiver makes any late reply a no-op.
                self.pending_photo = None;
                self.state = EditorState::Main;
            }
            EditorState::Disabled | EditorState::Main => {}
        }
    }

    fn flush(&mut self) -> Result<(), EditorError> {
        if !self.save_pending {
            return Ok(());
        }
        self.store.save()?;
        self.save_pending = false;
        Ok(())
    }
}

impl<D: DurableStore> Mode for JournalEditor<D> {
    fn name(&self) -> &'static str {
        JOURNAL_TITLE
    }

    fn initialize(&mut self, ctx: &mut HostContext<'_>) {
        ctx.list.set_title(JOURNAL_TITLE);
        ctx.list.close();
        ctx.host.set_input_mode(HostInputMode::Inactive);
        tracing::debug!(
            profile = %self.store.profile_id(),
            entries = self.entries().len(),
            "Journal mode initialized"
        );
    }

    fn enter(&mut self, ctx: &mut HostContext<'_>) {
        if self.state != EditorState::Disabled {
            tracing::error!("Unexpected state {} on enter", self.state);
            self.resolve_sub_state(ctx);
        }

        self.edges.reset();
        self.clamp_selection();
        self.state = EditorState::Main;
        ctx.list.open();
        ctx.host.set_input_mode(HostInputMode::Browsing);
        self.render(ctx);
    }

    fn exit(&mut self, ctx: &mut HostContext<'_>) -> Result<(), EditorError> {
        if self.state != EditorState::Main {
            tracing::error!("Unexpected state {} on exit", self.state);
            self.resolve_sub_state(ctx);
        }

        ctx.list.close();
        ctx.host.set_input_mode(HostInputMode::Inactive);
        self.state = EditorState::Disabled;
        self.flush()
    }

    fn update(&mut self, ctx: &mut HostContext<'_>, now: Instant) {
        if self.state == EditorState::Disabled {
            tracing::error!("Unexpected state {} on update", self.state);
            return;
        }

        self.edges.observe(ctx.input, now);
        match self.state {
            EditorState::Main => self.update_main(ctx),
            EditorState::Renaming | EditorState::EditingDescription => self.update_text_edit(ctx),
            EditorState::Deleting => self.update_deleting(ctx),
            EditorState::ChoosingPhoto => self.update_choosing_photo(ctx),
            EditorState::Disabled => {}
        }
    }

    fn allow_swap(&self) -> bool {
        self.state == EditorState::Main
    }

    fn allow_cancel(&self) -> bool {
        self.state == EditorState::Main
    }
}
