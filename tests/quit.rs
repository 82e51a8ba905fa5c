//! Quit confirmation with unsaved changes

mod common;

use common::{press, test_editor, CTRL_Q};
use termpad::keys::Key;
use termpad::KeyOutcome;

#[test]
fn clean_document_quits_immediately() {
    let mut editor = test_editor(&["a"]);
    let (_, outcome) = press(&mut editor, &[CTRL_Q]);
    assert_eq!(outcome, KeyOutcome::Quit);
}

#[test]
fn dirty_document_needs_repeated_quit() {
    let mut editor = test_editor(&["a"]);
    press(&mut editor, b"x");
    let quit_times = editor.config.quit_times;

    let mut term = common::ScriptedTerminal::new(b"");
    for _ in 1..quit_times {
        let outcome = editor.handle_key(&mut term, Key::Char(CTRL_Q)).unwrap();
        assert_eq!(outcome, KeyOutcome::Continue);
        assert!(editor.status.text.starts_with("WARNING!!!"));
    }
    let outcome = editor.handle_key(&mut term, Key::Char(CTRL_Q)).unwrap();
    assert_eq!(outcome, KeyOutcome::Quit);
}

#[test]
fn other_key_resets_the_count() {
    let mut editor = test_editor(&["a"]);
    press(&mut editor, b"x");

    let (_, outcome) = press(&mut editor, &[CTRL_Q, CTRL_Q]);
    assert_eq!(outcome, KeyOutcome::Continue);
    let (_, outcome) = press(&mut editor, b"\x1b[C");
    assert_eq!(outcome, KeyOutcome::Continue);
    let (_, outcome) = press(&mut editor, &[CTRL_Q, CTRL_Q]);
    assert_eq!(outcome, KeyOutcome::Continue);
    let (_, outcome) = press(&mut editor, &[CTRL_Q]);
    assert_eq!(outcome, KeyOutcome::Quit);
}

#[test]
fn warning_counts_down() {
    let mut editor = test_editor(&["a"]);
    press(&mut editor, b"x");
    press(&mut editor, &[CTRL_Q]);
    assert_eq!(
        editor.status.text,
        "WARNING!!! File has unsaved changes. Press Ctrl-Q 2 more times to quit."
    );
    press(&mut editor, &[CTRL_Q]);
    assert!(editor.status.text.contains("Press Ctrl-Q 1 more times"));
}
