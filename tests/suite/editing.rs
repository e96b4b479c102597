//! Keyboard-driven editing through the terminal host.

use crossterm::event::KeyCode;

use journal_engine::{
    Action, EditorOptions, EditorState, HostInputMode, InputPoll, ListDisplay, PhotoView,
};
use journal_tui::HostCommand;

use crate::common::{Journal, code, ctrl, key, shift};

#[test]
fn new_entry_is_named_then_described_then_saved() {
    let mut journal = Journal::fresh();
    journal.open();

    journal.frame(&[key('n')]);
    assert_eq!(journal.editor.state(), EditorState::Renaming);
    assert_eq!(journal.host.control.mode(), HostInputMode::TextCapture);
    assert!(journal.host.control.pause_locked());
    assert_eq!(journal.names(), vec!["New Entry"]);

    journal.clear_text();
    journal.type_text("Timber Hearth");
    journal.frame(&[code(KeyCode::Enter)]);
    assert_eq!(journal.editor.state(), EditorState::EditingDescription);
    assert_eq!(journal.names(), vec!["Timber Hearth"]);

    journal.type_text("Home village.\n\nLaunch site.");
    journal.frame(&[ctrl('s')]);
    assert_eq!(journal.editor.state(), EditorState::Main);
    assert!(!journal.host.control.pause_locked());
    assert!(journal.editor.save_pending());

    journal.close().expect("save");
    let mut journal = journal.reload();
    journal.open();

    let entry = &journal.editor.entries()[0];
    assert_eq!(entry.name, "Timber Hearth");
    assert_eq!(entry.description, "Home village.\n\nLaunch site.");
    let facts: Vec<&str> = journal
        .host
        .list
        .description()
        .blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect();
    assert_eq!(facts, vec!["Home village.", "Launch site."]);
}

#[test]
fn new_entries_are_inserted_after_the_selection() {
    let mut journal = Journal::with_names(&["Sun Station", "Hourglass Twins"]);
    journal.open();

    journal.frame(&[key('n')]);
    journal.frame(&[code(KeyCode::Esc)]);
    journal.frame(&[code(KeyCode::Esc)]);

    assert_eq!(journal.editor.state(), EditorState::Main);
    assert_eq!(
        journal.names(),
        vec!["Sun Station", "New Entry", "Hourglass Twins"]
    );
    assert_eq!(journal.editor.selected_index(), 1);
}

#[test]
fn blank_name_is_ignored() {
    let mut journal = Journal::with_names(&["Quantum Moon"]);
    journal.open();

    journal.frame(&[key('r')]);
    journal.idle_for(EditorOptions::default().rename_hold);
    assert_eq!(journal.editor.state(), EditorState::Renaming);

    journal.clear_text();
    journal.type_text("   ");
    journal.frame(&[code(KeyCode::Enter)]);

    assert_eq!(journal.editor.state(), EditorState::Main);
    assert_eq!(journal.names(), vec!["Quantum Moon"]);
    assert!(!journal.editor.save_pending());
}

#[test]
fn tapping_edit_describes_and_escape_discards() {
    let mut journal = Journal::with_names(&["Dark Bramble"]);
    journal.open();

    journal.frame(&[key('e')]);
    journal.frame(&[]);
    assert_eq!(journal.editor.state(), EditorState::EditingDescription);

    journal.type_text("Follow the seeds");
    journal.frame(&[code(KeyCode::Esc)]);

    assert_eq!(journal.editor.state(), EditorState::Main);
    assert_eq!(journal.editor.entries()[0].description, "");
    assert!(!journal.editor.save_pending());
}

#[test]
fn delete_marks_first_and_needs_a_hold() {
    let mut journal = Journal::with_names(&["Attlerock", "Interloper", "White Hole"]);
    journal.open();
    journal.frame(&[code(KeyCode::Down)]);
    assert_eq!(journal.editor.selected_index(), 1);

    journal.frame(&[key('d')]);
    assert_eq!(journal.editor.state(), EditorState::Deleting);
    assert!(journal.host.list.rows()[1].marked_for_deletion);
    assert_eq!(journal.frame(&[key('q')]), HostCommand::Continue);

    journal.frame(&[code(KeyCode::Esc)]);
    assert_eq!(journal.editor.state(), EditorState::Main);
    assert!(!journal.host.list.rows()[1].marked_for_deletion);
    assert_eq!(journal.names().len(), 3);

    journal.frame(&[key('d')]);
    journal.frame(&[]);
    journal.frame(&[key('d')]);
    journal.idle_for(EditorOptions::default().delete_hold);

    assert_eq!(journal.editor.state(), EditorState::Main);
    assert_eq!(journal.names(), vec!["Attlerock", "White Hole"]);
    assert_eq!(journal.editor.selected_index(), 1);
    assert_eq!(journal.host.list.selected_index(), 1);
}

#[test]
fn deleting_the_last_entry_selects_the_new_last() {
    let mut journal = Journal::with_names(&["Ember Twin", "Giant's Deep"]);
    journal.open();
    journal.frame(&[code(KeyCode::Down)]);

    journal.frame(&[key('D')]);
    journal.idle_for(EditorOptions::default().delete_hold);

    assert_eq!(journal.names(), vec!["Ember Twin"]);
    assert_eq!(journal.editor.selected_index(), 0);
}

#[test]
fn shifted_navigation_moves_the_entry() {
    let mut journal = Journal::with_names(&["Ash Twin", "Ember Twin", "Timber Hearth"]);
    journal.open();

    journal.frame(&[shift(KeyCode::Down)]);
    assert_eq!(journal.names(), vec!["Ember Twin", "Ash Twin", "Timber Hearth"]);
    assert_eq!(journal.editor.selected_index(), 1);
    assert!(journal.editor.save_pending());

    journal.frame(&[]);
    assert!(!journal.host.keys.is_pressed(Action::Move));
    journal.frame(&[code(KeyCode::Down)]);
    assert_eq!(journal.names(), vec!["Ember Twin", "Ash Twin", "Timber Hearth"]);
    assert_eq!(journal.editor.selected_index(), 2);

    journal.close().expect("save");
    let journal = journal.reload();
    assert_eq!(journal.names(), vec!["Ember Twin", "Ash Twin", "Timber Hearth"]);
}

#[test]
fn last_entry_moves_up_to_the_top() {
    let mut journal = Journal::with_names(&["Ash Twin", "Ember Twin", "Timber Hearth"]);
    journal.open();
    journal.frame(&[code(KeyCode::Down)]);
    journal.frame(&[code(KeyCode::Down)]);
    assert_eq!(journal.editor.selected_index(), 2);
    assert!(!journal.editor.save_pending());

    journal.frame(&[shift(KeyCode::Up)]);
    assert_eq!(journal.names(), vec!["Ash Twin", "Timber Hearth", "Ember Twin"]);
    assert_eq!(journal.editor.selected_index(), 1);

    journal.frame(&[]);
    journal.frame(&[key('K')]);
    assert_eq!(journal.names(), vec!["Timber Hearth", "Ash Twin", "Ember Twin"]);
    assert_eq!(journal.editor.selected_index(), 0);
    assert_eq!(journal.host.list.selected_index(), 0);

    journal.close().expect("save");
    let journal = journal.reload();
    assert_eq!(journal.names(), vec!["Timber Hearth", "Ash Twin", "Ember Twin"]);
}

#[test]
fn photo_is_chosen_from_the_album_and_removed_by_holding() {
    let mut journal = Journal::with_names(&["Orbital Probe Cannon"]);
    journal.add_photo("a.png");
    journal.add_photo("b.png");
    journal.open();

    journal.frame(&[key('p')]);
    journal.frame(&[]);
    assert_eq!(journal.editor.state(), EditorState::ChoosingPhoto);
    assert_eq!(journal.host.control.mode(), HostInputMode::Suspended);
    let chooser = journal.host.album.chooser().expect("chooser open");
    assert_eq!(chooser.items(), ["a.png", "b.png"]);

    journal.frame(&[code(KeyCode::Down), code(KeyCode::Enter)]);
    assert_eq!(journal.editor.state(), EditorState::Main);
    assert!(journal.host.list.is_open());
    assert_eq!(
        journal.editor.entries()[0].photo_reference.as_deref(),
        Some("b.png")
    );
    assert!(matches!(
        &journal.host.list.description().photo,
        PhotoView::Image(image) if image.reference == "b.png"
    ));

    journal.frame(&[key('P')]);
    journal.idle_for(EditorOptions::default().remove_photo_hold);
    assert!(journal.editor.entries()[0].photo_reference.is_none());
    assert_eq!(journal.host.list.description().photo, PhotoView::Placeholder);
}

#[test]
fn dismissing_the_chooser_changes_nothing() {
    let mut journal = Journal::with_names(&["Nomai Mines"]);
    journal.add_photo("a.png");
    journal.open();

    journal.frame(&[key('p')]);
    journal.frame(&[]);
    journal.frame(&[code(KeyCode::Esc)]);

    assert_eq!(journal.editor.state(), EditorState::Main);
    assert!(journal.editor.entries()[0].photo_reference.is_none());
    assert!(!journal.editor.save_pending());
    assert!(journal.host.album.chooser().is_none());
}

#[test]
fn closing_with_the_chooser_open_drops_its_answer() {
    let mut journal = Journal::with_names(&["Hanging City"]);
    journal.add_photo("a.png");
    journal.open();

    journal.frame(&[key('p')]);
    journal.frame(&[]);
    journal.close().expect("close");
    assert_eq!(journal.editor.state(), EditorState::Disabled);

    journal.host.album.drop_abandoned();
    assert!(journal.host.album.chooser().is_none());
}

#[test]
fn force_quit_mid_edit_discards_the_edit_and_saves_the_rest() {
    let mut journal = Journal::with_names(&["Stranger"]);
    journal.open();

    journal.frame(&[key('m')]);
    journal.frame(&[key('e')]);
    journal.frame(&[]);
    assert_eq!(journal.editor.state(), EditorState::EditingDescription);
    journal.type_text("unfinished");

    assert_eq!(journal.frame(&[ctrl('c')]), HostCommand::Continue);
    assert!(journal.host.notice().is_some());
    assert_eq!(journal.frame(&[ctrl('c')]), HostCommand::Quit);
    journal.close().expect("save");
    assert_eq!(journal.editor.state(), EditorState::Disabled);
    assert!(!journal.host.control.pause_locked());

    let record = journal.read_record();
    assert!(record.entries[0].has_more_to_explore);
    assert_eq!(record.entries[0].description, "");
}

#[test]
fn quitting_from_the_list_is_immediate() {
    let mut journal = Journal::with_names(&["Vessel"]);
    journal.open();
    assert_eq!(journal.frame(&[key('q')]), HostCommand::Quit);
}
