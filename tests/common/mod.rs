//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use quill::editor::Editor;
use quill::highlight::c_like;

/// Create an editor over the given text with default config.
pub fn editor_with(text: &str) -> Editor {
    Editor::with_text(text)
}

/// Create an editor with the C-like highlighting profile installed.
pub fn highlighted(text: &str) -> Editor {
    let mut editor = Editor::with_text(text);
    editor.set_highlighter(c_like().expect("profile patterns are valid"));
    editor
}

/// Type a string one character at a time, as a user would.
pub fn type_str(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        editor.type_char(ch);
    }
}
