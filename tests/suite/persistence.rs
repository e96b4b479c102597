//! Record lifecycle on disk: absent, malformed and existing records.

use std::fs;

use crossterm::event::KeyCode;
use insta::assert_snapshot;

use journal_store::CORRUPTED_SUFFIX;

use crate::common::{Journal, code, ctrl, key};

/// Create one entry named `name` through the keyboard and go back to browsing.
fn create_entry(journal: &mut Journal, name: &str) {
    journal.frame(&[key('n')]);
    journal.clear_text();
    journal.type_text(name);
    journal.frame(&[code(KeyCode::Enter)]);
    journal.frame(&[ctrl('s')]);
}

#[test]
fn absent_record_starts_empty_and_is_written_on_close() {
    let mut journal = Journal::fresh();
    journal.open();
    assert!(journal.editor.entries().is_empty());
    assert!(!journal.record_path().exists());

    create_entry(&mut journal, "Probe");
    journal.close().expect("save");

    assert!(!journal.backup_path().exists());
    let record = fs::read_to_string(journal.record_path()).expect("record");
    assert_snapshot!(record, @r#"
    {
      "showPrompts": true,
      "entries": [
        {
          "name": "Probe",
          "description": "",
          "hasMoreToExplore": false,
          "photoReference": null
        }
      ]
    }
    "#);
}

#[test]
fn closing_without_changes_writes_nothing() {
    let mut journal = Journal::fresh();
    journal.open();
    journal.close().expect("close");
    assert!(!journal.record_path().exists());
}

#[test]
fn malformed_record_is_quarantined() {
    let mut journal = Journal::with_record("{ not json");
    journal.open();

    assert!(journal.editor.entries().is_empty());
    assert!(!journal.record_path().exists());
    let quarantined = fs::read_to_string(journal.sibling(CORRUPTED_SUFFIX)).expect("quarantined");
    assert_eq!(quarantined, "{ not json");

    create_entry(&mut journal, "Fresh start");
    journal.close().expect("save");

    assert!(!journal.backup_path().exists());
    assert_eq!(journal.read_record().entries[0].name, "Fresh start");
}

#[test]
fn wrongly_shaped_record_counts_as_malformed() {
    let mut journal = Journal::with_record(r#"{ "entries": 5 }"#);
    journal.open();
    assert!(journal.editor.entries().is_empty());
    assert!(journal.sibling(CORRUPTED_SUFFIX).exists());
}

#[test]
fn missing_fields_take_defaults() {
    let mut journal = Journal::with_record("{}");
    journal.open();
    assert!(journal.editor.entries().is_empty());
    assert!(journal.editor.show_prompts());
    assert!(!journal.sibling(CORRUPTED_SUFFIX).exists());
}

#[test]
fn existing_record_is_backed_up_once_per_load() {
    let original = r#"{"showPrompts":true,"entries":[{"name":"Ash Twin"}]}"#;
    let mut journal = Journal::with_record(original);

    journal.open();
    journal.frame(&[key('m')]);
    journal.close().expect("first save");
    assert_eq!(
        fs::read_to_string(journal.backup_path()).expect("backup"),
        original
    );

    // A second save from the same load leaves the backup alone.
    journal.open();
    journal.frame(&[key('m')]);
    journal.close().expect("second save");
    assert_eq!(
        fs::read_to_string(journal.backup_path()).expect("backup"),
        original
    );

    // A new load backs up what the previous one wrote.
    let previous = fs::read_to_string(journal.record_path()).expect("record");
    let mut journal = journal.reload();
    journal.open();
    journal.frame(&[key('m')]);
    journal.close().expect("third save");
    assert_eq!(
        fs::read_to_string(journal.backup_path()).expect("backup"),
        previous
    );
    assert!(journal.read_record().entries[0].has_more_to_explore);
}

#[test]
fn prompt_visibility_persists() {
    let mut journal = Journal::with_names(&["Brittle Hollow"]);
    journal.open();
    journal.frame(&[key('h')]);
    assert!(!journal.editor.show_prompts());
    journal.close().expect("save");

    let mut journal = journal.reload();
    journal.open();
    assert!(!journal.editor.show_prompts());
}
