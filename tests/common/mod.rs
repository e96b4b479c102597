//! Shared test utilities and fixtures
//!
//! A full journal stack (file store, editor, terminal host) over a temporary
//! data directory, driven one frame at a time with terminal key events.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use journal_engine::{EditorError, EditorOptions, EntryStore, FsStore, JournalEditor, Mode};
use journal_store::BACKUP_SUFFIX;
use journal_tui::{EditorStatus, Host, HostCommand, apply_event};
use journal_types::SaveData;
use journal_utils::sibling_path;

pub const PROFILE: &str = "Hearthian";
pub const FRAME: Duration = Duration::from_millis(8);
const RELEASE_TIMEOUT: Duration = Duration::from_millis(550);

pub struct Journal {
    dir: TempDir,
    pub editor: JournalEditor,
    pub host: Host,
    now: Instant,
}

impl Journal {
    /// Empty data directory.
    pub fn fresh() -> Self {
        Self::in_dir(tempfile::tempdir().expect("tempdir"))
    }

    /// Data directory whose record already holds `contents`.
    pub fn with_record(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let saves = dir.path().join("saves");
        fs::create_dir_all(&saves).expect("create saves dir");
        fs::write(saves.join(format!("{PROFILE}.json")), contents).expect("write record");
        Self::in_dir(dir)
    }

    /// Data directory whose record holds entries with these names.
    pub fn with_names(names: &[&str]) -> Self {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();
        let record = serde_json::json!({ "showPrompts": true, "entries": entries });
        Self::with_record(&record.to_string())
    }

    fn in_dir(dir: TempDir) -> Self {
        let store = EntryStore::load(FsStore::new(dir.path().join("saves")), PROFILE);
        let editor = JournalEditor::new(store, EditorOptions::default());
        let host = Host::new(dir.path().join("photos"), false, RELEASE_TIMEOUT);
        Self {
            dir,
            editor,
            host,
            now: Instant::now(),
        }
    }

    /// Drop the in-memory journal and load it again from disk.
    pub fn reload(self) -> Self {
        Self::in_dir(self.dir)
    }

    pub fn open(&mut self) {
        self.editor.initialize(&mut self.host.context());
        self.editor.enter(&mut self.host.context());
    }

    pub fn close(&mut self) -> Result<(), EditorError> {
        self.editor.exit(&mut self.host.context())
    }

    pub fn record_path(&self) -> PathBuf {
        self.dir.path().join("saves").join(format!("{PROFILE}.json"))
    }

    pub fn sibling(&self, suffix: &str) -> PathBuf {
        sibling_path(&self.record_path(), suffix)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.sibling(BACKUP_SUFFIX)
    }

    pub fn read_record(&self) -> SaveData {
        let bytes = fs::read(self.record_path()).expect("read record");
        SaveData::decode(&bytes).expect("decode record")
    }

    pub fn add_photo(&self, name: &str) {
        let photos = self.dir.path().join("photos");
        fs::create_dir_all(&photos).expect("create photos dir");
        fs::write(photos.join(name), b"not really a png").expect("write photo");
    }

    /// One frame: deliver `events` to the host, then advance the editor.
    pub fn frame(&mut self, events: &[Event]) -> HostCommand {
        self.now += FRAME;
        let now = self.now;
        self.host.keys.begin_frame(now);

        let status = EditorStatus::of(&self.editor);
        let mut command = HostCommand::Continue;
        for event in events {
            if apply_event(&mut self.host, &status, event.clone(), now) == HostCommand::Quit {
                command = HostCommand::Quit;
            }
        }

        self.editor.update(&mut self.host.context(), now);
        self.host.album.drop_abandoned();
        command
    }

    /// Run empty frames until `duration` has passed.
    pub fn idle_for(&mut self, duration: Duration) {
        let until = self.now + duration;
        while self.now < until {
            self.frame(&[]);
        }
    }

    /// Type `text` into the focused field, one key per character.
    pub fn type_text(&mut self, text: &str) {
        let events: Vec<Event> = text
            .chars()
            .map(|c| match c {
                '\n' => code(KeyCode::Enter),
                c => key(c),
            })
            .collect();
        self.frame(&events);
    }

    /// Erase the focused field.
    pub fn clear_text(&mut self) {
        let count = self.host.text.draft().grapheme_count();
        let events = vec![code(KeyCode::Backspace); count];
        self.frame(&events);
    }

    pub fn names(&self) -> Vec<String> {
        self.editor
            .entries()
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }
}

pub fn key(c: char) -> Event {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers))
}

pub fn code(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn shift(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::SHIFT))
}

pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}
