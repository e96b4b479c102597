//! Text widget the editor types entry names and descriptions into.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use journal_engine::{TextInput, TextTarget, WidgetHandle};

/// Edit buffer with a grapheme-indexed caret.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DraftText {
    text: String,
    cursor: usize,
}

impl DraftText {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position in graphemes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the contents and park the caret after the last grapheme.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.grapheme_count();
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index_at(self.cursor);
        self.text.insert(at, c);
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let at = self.byte_index_at(self.cursor);
        self.text.insert_str(at, s);
        let inserted = s.graphemes(true).count();
        self.cursor = (self.cursor + inserted).min(self.grapheme_count());
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn delete_word_backwards(&mut self) {
        while self.cursor > 0 && self.grapheme_is_whitespace(self.cursor - 1) {
            self.backspace();
        }
        while self.cursor > 0 && !self.grapheme_is_whitespace(self.cursor - 1) {
            self.backspace();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    /// Start of the caret's line.
    pub fn move_home(&mut self) {
        self.cursor = self
            .text
            .graphemes(true)
            .take(self.cursor)
            .enumerate()
            .filter(|(_, g)| *g == "\n")
            .last()
            .map_or(0, |(i, _)| i + 1);
    }

    /// End of the caret's line.
    pub fn move_end(&mut self) {
        let total = self.grapheme_count();
        self.cursor = self
            .text
            .graphemes(true)
            .enumerate()
            .skip(self.cursor)
            .find(|(_, g)| *g == "\n")
            .map_or(total, |(i, _)| i);
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Caret position as (line, display column).
    #[must_use]
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.byte_index_at(self.cursor)];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line, before[line_start..].width())
    }

    fn grapheme_is_whitespace(&self, index: usize) -> bool {
        self.text
            .graphemes(true)
            .nth(index)
            .is_some_and(|g| g.chars().all(char::is_whitespace))
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// The host's single text field. Focused on one [`TextTarget`] at a time.
#[derive(Debug)]
pub struct TerminalTextInput {
    handle: WidgetHandle,
    target: Option<TextTarget>,
    draft: DraftText,
}

impl TerminalTextInput {
    #[must_use]
    pub fn new(handle: WidgetHandle) -> Self {
        Self {
            handle,
            target: None,
            draft: DraftText::default(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> WidgetHandle {
        self.handle
    }

    #[must_use]
    pub fn target(&self) -> Option<TextTarget> {
        self.target
    }

    #[must_use]
    pub fn draft(&self) -> &DraftText {
        &self.draft
    }

    /// Apply an editing key. Returns false for keys the field does not consume.
    pub fn apply_key(&mut self, key: KeyEvent) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('w') if ctrl => self.draft.delete_word_backwards(),
            KeyCode::Backspace if ctrl || alt => self.draft.delete_word_backwards(),
            KeyCode::Char(c) if !ctrl => self.draft.insert_char(c),
            KeyCode::Enter if target.is_multiline() => self.draft.insert_char('\n'),
            KeyCode::Backspace => self.draft.backspace(),
            KeyCode::Delete => self.draft.delete_forward(),
            KeyCode::Left => self.draft.move_left(),
            KeyCode::Right => self.draft.move_right(),
            KeyCode::Home => self.draft.move_home(),
            KeyCode::End => self.draft.move_end(),
            _ => return false,
        }
        true
    }

    /// Insert pasted text. Names stay on one line.
    pub fn paste(&mut self, text: &str) {
        let Some(target) = self.target else {
            return;
        };
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if target.is_multiline() {
            self.draft.insert_str(&normalized);
        } else {
            self.draft.insert_str(&normalized.replace('\n', " "));
        }
    }
}

impl TextInput for TerminalTextInput {
    fn enable(&mut self, target: TextTarget, initial: &str) {
        self.target = Some(target);
        self.draft.set_text(initial);
    }

    fn disable(&mut self) -> String {
        self.target = None;
        self.draft.take_text()
    }

    fn owns(&self, handle: WidgetHandle) -> bool {
        self.target.is_some() && handle == self.handle
    }
}
