//! Selection tests - linear and rectangular modes, word-anchor drags

mod common;

use common::editor_with;
use quill::SelectionMode;

// ========================================================================
// Normal mode
// ========================================================================

#[test]
fn test_click_collapses_selection() {
    let mut editor = editor_with("hello");
    editor.click(0, 1);
    editor.drag_to(0, 4);
    assert_eq!(editor.selected_text(), "ell");

    editor.click(0, 2);
    assert!(editor.cursor().is_empty());
    assert_eq!(editor.selected_text(), "");
}

#[test]
fn test_click_clamps_to_line_end() {
    let mut editor = editor_with("ab\ncdef");
    editor.click(0, 99);
    assert_eq!(editor.cursor().caret.col, 2);
    editor.click(99, 0);
    assert_eq!(editor.cursor().caret.row, 1);
}

#[test]
fn test_reverse_drag_orders_endpoints() {
    let mut editor = editor_with("one two three");
    editor.click(0, 7);
    editor.drag_to(0, 4);
    assert_eq!(editor.selected_text(), "two");
}

#[test]
fn test_select_all() {
    let mut editor = editor_with("a\nbb\nccc");
    editor.select_all();
    assert_eq!(editor.selected_text(), "a\nbb\nccc");
    assert_eq!(editor.cursor().caret.row, 2);
    assert_eq!(editor.cursor().caret.col, 3);
}

// ========================================================================
// Word anchor
// ========================================================================

#[test]
fn test_double_click_selects_word() {
    let mut editor = editor_with("alpha beta gamma");
    editor.select_word_at(0, 8);
    assert_eq!(editor.selected_text(), "beta");
    assert!(editor.cursor().word_anchor.valid);
}

#[test]
fn test_word_drag_forward_extends_by_words() {
    let mut editor = editor_with("alpha beta gamma");
    editor.select_word_at(0, 8);
    editor.drag_to(0, 12);
    assert_eq!(editor.selected_text(), "beta gamma");
}

#[test]
fn test_word_drag_backward_keeps_anchored_word() {
    let mut editor = editor_with("alpha beta gamma");
    editor.select_word_at(0, 8);
    editor.drag_to(0, 2);
    assert_eq!(editor.selected_text(), "alpha beta");
}

#[test]
fn test_word_drag_across_rows() {
    let mut editor = editor_with("alpha beta\ngamma delta");
    editor.select_word_at(0, 7);
    editor.drag_to(1, 2);
    assert_eq!(editor.selected_text(), "beta\ngamma");
}

#[test]
fn test_plain_click_clears_word_anchor() {
    let mut editor = editor_with("alpha beta");
    editor.select_word_at(0, 1);
    editor.click(0, 8);
    assert!(!editor.cursor().word_anchor.valid);
}

// ========================================================================
// Rectangular mode
// ========================================================================

#[test]
fn test_rect_selection_covers_column_interval() {
    let mut editor = editor_with("abcdef\nghijkl\nmnopqr");
    editor.begin_rect(0, 2);
    editor.drag_to(2, 5);
    assert_eq!(editor.cursor().mode, SelectionMode::Rect);
    assert_eq!(editor.selected_text(), "cde\nijk\nopq");
}

#[test]
fn test_rect_delete_clamps_to_each_row() {
    // Columns [2, 5) over a 3-char row and a 10-char row: the short row
    // loses only what it has.
    let mut editor = editor_with("abc\nabcdefghij");
    editor.begin_rect(0, 2);
    editor.drag_to(1, 5);
    editor.backspace();
    assert_eq!(editor.text(), "ab\nabfghij");
    assert_eq!(editor.cursor().caret.col, 2);
}

#[test]
fn test_rect_columns_count_tabs_visually() {
    // A 4-wide tab occupies columns 0..4, so column 5 lands after 'x'.
    let mut editor = editor_with("\txy\n123456");
    editor.begin_rect(0, 4);
    editor.drag_to(1, 6);
    assert_eq!(editor.selected_text(), "xy\n56");
}

#[test]
fn test_rect_type_inserts_on_every_row() {
    let mut editor = editor_with("11\n22\n33");
    editor.begin_rect(0, 1);
    editor.drag_to(2, 1);
    editor.type_char('|');
    assert_eq!(editor.text(), "1|1\n2|2\n3|3");
}

#[test]
fn test_rect_edit_undoes_as_one_step() {
    let mut editor = editor_with("abcd\nefgh");
    editor.begin_rect(0, 1);
    editor.drag_to(1, 3);
    editor.delete_forward();
    assert_eq!(editor.text(), "ad\neh");

    editor.undo();
    assert_eq!(editor.text(), "abcd\nefgh");
}

#[test]
fn test_paste_leaves_rect_mode() {
    let mut editor = editor_with("ab\ncd");
    editor.begin_rect(1, 1);
    editor.insert_text("X");
    assert_eq!(editor.cursor().mode, SelectionMode::Normal);
    assert_eq!(editor.text(), "ab\ncXd");
}

#[test]
fn test_paste_over_rect_selection_uses_visual_column() {
    // Column 5 on a tab-led row is char index 2, so after the rectangle
    // [5, 6) is spliced out the paste lands right where 'b' was.
    let mut editor = editor_with("\tabz\n\tcbz");
    editor.begin_rect(0, 5);
    editor.drag_to(1, 6);
    editor.insert_text("X");
    assert_eq!(editor.text(), "\taz\n\tcXz");
    assert_eq!(editor.cursor().mode, SelectionMode::Normal);
    assert_eq!(editor.cursor().caret.col, 3);
}

#[test]
fn test_enter_over_rect_selection_splits_at_visual_column() {
    let mut editor = editor_with("\tabz\n\tcbz");
    editor.begin_rect(0, 5);
    editor.drag_to(1, 6);
    editor.enter();
    // Rectangle removed, caret row split at column 5, indent carried.
    assert_eq!(editor.text(), "\taz\n\tc\n\tz");
    assert_eq!(editor.cursor().mode, SelectionMode::Normal);
    let (row, col) = editor.caret_char_index();
    assert_eq!((row, col), (2, 1));
}

#[test]
fn test_rect_typed_tab_advances_to_tab_stop() {
    let mut editor = editor_with("ab\ncd");
    editor.begin_rect(0, 1);
    editor.drag_to(1, 1);
    editor.type_char('\t');
    assert_eq!(editor.text(), "a\tb\nc\td");
    // Caret column is visual, so the tab moves it to the next stop.
    assert_eq!(editor.cursor().mode, SelectionMode::Rect);
    assert_eq!(editor.cursor().caret.col, 4);
}
