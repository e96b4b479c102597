//! Entry list collaborator: keeps what the editor last pushed for drawing.

use journal_engine::{DescriptionView, ListDisplay, ListRow};

#[derive(Debug, Default)]
pub struct TerminalList {
    title: String,
    is_open: bool,
    rows: Vec<ListRow>,
    selected: usize,
    pending_navigation: isize,
    description: DescriptionView,
    redraw_requested: bool,
}

impl TerminalList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a selection move, applied on the editor's next poll.
    pub fn navigate(&mut self, delta: isize) {
        self.pending_navigation = self.pending_navigation.saturating_add(delta);
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    #[must_use]
    pub fn description(&self) -> &DescriptionView {
        &self.description
    }

    /// Returns and clears the full-redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl ListDisplay for TerminalList {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn open(&mut self) {
        self.is_open = true;
    }

    fn close(&mut self) {
        self.is_open = false;
        self.pending_navigation = 0;
    }

    fn set_rows(&mut self, rows: Vec<ListRow>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index.min(self.rows.len().saturating_sub(1));
    }

    fn poll_navigation(&mut self) -> isize {
        let delta = std::mem::take(&mut self.pending_navigation);
        if delta == 0 || self.rows.is_empty() || !self.is_open {
            return 0;
        }
        let last = self.rows.len() as isize - 1;
        let target = (self.selected as isize + delta).clamp(0, last);
        let moved = target - self.selected as isize;
        self.selected = target as usize;
        moved
    }

    fn force_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn set_description(&mut self, view: DescriptionView) {
        self.description = view;
    }
}
