//! Text editing tests - insert, delete, undo/redo

mod common;

use common::{editor_with, type_str};
use quill::editor::Editor;
use quill::EditorConfig;

// ========================================================================
// Typing
// ========================================================================

#[test]
fn test_insert_char_at_start() {
    let mut editor = editor_with("hello");
    editor.click(0, 0);
    editor.type_char('X');

    assert_eq!(editor.text(), "Xhello");
    assert_eq!(editor.cursor().caret.col, 1);
    assert_eq!(editor.cursor().caret.row, 0);
}

#[test]
fn test_insert_char_at_middle() {
    let mut editor = editor_with("hello");
    editor.click(0, 2);
    editor.type_char('X');

    assert_eq!(editor.text(), "heXllo");
    assert_eq!(editor.cursor().caret.col, 3);
}

#[test]
fn test_insert_char_at_end() {
    let mut editor = editor_with("hello");
    editor.click(0, 5);
    editor.type_char('X');

    assert_eq!(editor.text(), "helloX");
    assert_eq!(editor.cursor().caret.col, 6);
}

#[test]
fn test_newline_char_routes_to_enter() {
    let mut editor = editor_with("ab");
    editor.click(0, 1);
    editor.type_char('\n');

    assert_eq!(editor.text(), "a\nb");
    assert_eq!(editor.cursor().caret.row, 1);
}

#[test]
fn test_enter_carries_indentation() {
    let mut editor = editor_with("\tif (x) {");
    editor.click(0, 9);
    editor.enter();

    assert_eq!(editor.text(), "\tif (x) {\n\t");
    assert_eq!(editor.cursor().caret.col, 1);
}

#[test]
fn test_typing_over_selection_replaces_it() {
    let mut editor = editor_with("one two three");
    editor.click(0, 4);
    editor.drag_to(0, 7);
    editor.type_char('2');

    assert_eq!(editor.text(), "one 2 three");
}

// ========================================================================
// Backspace / delete
// ========================================================================

#[test]
fn test_backspace_removes_previous_char() {
    let mut editor = editor_with("hello");
    editor.click(0, 3);
    editor.backspace();

    assert_eq!(editor.text(), "helo");
    assert_eq!(editor.cursor().caret.col, 2);
}

#[test]
fn test_backspace_at_line_start_joins() {
    let mut editor = editor_with("one\ntwo");
    editor.click(1, 0);
    editor.backspace();

    assert_eq!(editor.text(), "onetwo");
    assert_eq!(editor.cursor().caret.col, 3);
}

#[test]
fn test_delete_forward_at_line_end_joins() {
    let mut editor = editor_with("one\ntwo");
    editor.click(0, 3);
    editor.delete_forward();

    assert_eq!(editor.text(), "onetwo");
}

#[test]
fn test_delete_selection_spanning_lines() {
    let mut editor = editor_with("alpha\nbeta\ngamma");
    editor.click(0, 2);
    editor.drag_to(2, 3);
    editor.delete_forward();

    assert_eq!(editor.text(), "alma");
    assert_eq!(editor.line_count(), 1);
}

// ========================================================================
// Paste and line operations
// ========================================================================

#[test]
fn test_paste_single_line() {
    let mut editor = editor_with("ad");
    editor.click(0, 1);
    editor.insert_text("bc");

    assert_eq!(editor.text(), "abcd");
    assert_eq!(editor.cursor().caret.col, 3);
}

#[test]
fn test_paste_multi_line_lands_caret_after_last_piece() {
    let mut editor = editor_with("xy");
    editor.click(0, 1);
    editor.insert_text("1\n22\n333");

    assert_eq!(editor.text(), "x1\n22\n333y");
    assert_eq!(editor.cursor().caret.row, 2);
    assert_eq!(editor.cursor().caret.col, 3);
}

#[test]
fn test_indent_selected_lines() {
    let mut editor = editor_with("a\nb\nc");
    editor.click(0, 0);
    editor.drag_to(1, 1);
    editor.indent();

    assert_eq!(editor.text(), "\ta\n\tb\nc");
}

#[test]
fn test_duplicate_selected_lines() {
    let mut editor = editor_with("a\nb\nc");
    editor.click(0, 0);
    editor.drag_to(1, 0);
    editor.duplicate_lines();

    assert_eq!(editor.text(), "a\nb\na\nb\nc");
}

// ========================================================================
// Undo / redo
// ========================================================================

#[test]
fn test_n_edits_n_undos_restore_original() {
    let original = "fn main() {\n    body\n}";
    let mut editor = editor_with(original);

    editor.click(1, 8);
    editor.type_char('!');
    editor.click(0, 0);
    editor.enter();
    editor.click(2, 0);
    editor.drag_to(2, 4);
    editor.backspace();

    editor.undo();
    editor.undo();
    editor.undo();
    assert_eq!(editor.text(), original);
    assert!(!editor.can_undo());
}

#[test]
fn test_typed_word_coalesces_to_one_undo_step() {
    let mut editor = editor_with("");
    type_str(&mut editor, "cat");

    editor.undo();
    assert_eq!(editor.text(), "");
    assert!(!editor.can_undo());
}

#[test]
fn test_space_extends_the_previous_run() {
    let mut editor = editor_with("");
    type_str(&mut editor, "a b");

    // The trailing space merged into the first run; the char after it
    // starts a new step.
    editor.undo();
    assert_eq!(editor.text(), "a ");
    editor.undo();
    assert_eq!(editor.text(), "");
    assert!(!editor.can_undo());
}

#[test]
fn test_enter_is_its_own_undo_step() {
    let mut editor = editor_with("");
    editor.type_char('c');
    editor.enter();

    editor.undo();
    assert_eq!(editor.text(), "c");
    editor.undo();
    assert_eq!(editor.text(), "");
}

#[test]
fn test_backspace_run_is_separate_from_typing() {
    let mut editor = editor_with("");
    type_str(&mut editor, "abc");
    editor.backspace();
    editor.backspace();

    editor.undo();
    assert_eq!(editor.text(), "abc");
    editor.undo();
    assert_eq!(editor.text(), "");
}

#[test]
fn test_redo_replays_coalesced_step() {
    let mut editor = editor_with("x");
    editor.click(0, 1);
    type_str(&mut editor, "yz");

    editor.undo();
    assert_eq!(editor.text(), "x");
    editor.redo();
    assert_eq!(editor.text(), "xyz");
    assert!(!editor.can_redo());
}

#[test]
fn test_new_edit_discards_redo_branch() {
    let mut editor = editor_with("");
    editor.type_char('a');
    editor.enter();
    editor.undo();
    editor.type_char('b');

    assert!(!editor.can_redo());
    assert_eq!(editor.text(), "ab");
}

#[test]
fn test_undo_restores_caret_and_selection() {
    let mut editor = editor_with("one two");
    editor.click(0, 0);
    editor.drag_to(0, 3);
    editor.type_char('1');
    editor.click(0, 0);

    editor.undo();
    assert_eq!(editor.text(), "one two");
    // Before-snapshot had "one" selected.
    assert_eq!(editor.selected_text(), "one");
}

#[test]
fn test_undo_depth_is_bounded() {
    let config = EditorConfig {
        undo_depth: 2,
        ..EditorConfig::default()
    };
    let mut editor = Editor::with_config("", config);
    editor.type_char('a');
    editor.enter();
    editor.type_char('b');
    editor.enter();

    editor.undo();
    editor.undo();
    assert!(!editor.can_undo());
    // Oldest steps were trimmed, so the original is unreachable.
    assert_ne!(editor.text(), "");
}
