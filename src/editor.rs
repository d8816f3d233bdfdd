//! Editing session facade
//!
//! [`Editor`] owns the buffer, highlighter, cursor state, and undo
//! history, and exposes the editing operations a host UI drives: typing,
//! structural edits, selection gestures, and undo/redo. Every mutation
//! runs through the same pipeline: snapshot the affected rows, apply the
//! edit, drain buffer damage into the highlighter, store the patch, and
//! notify listeners.

use std::fmt;

use crate::buffer::Buffer;
use crate::chars::word_bounds;
use crate::column::{column_to_index, column_to_index_unsafe, index_to_column};
use crate::config::EditorConfig;
use crate::highlight::{Highlighter, Style, Token};
use crate::selection::{CursorState, SelectionMode};
use crate::undo::{OpTag, UndoPatch, UndoStack};

/// Called with the dirtied line range `(start, end)` after an edit has
/// been revalidated.
pub type LineListener = Box<dyn FnMut(usize, usize)>;

/// Called with the cursor state after an operation moved the caret or
/// changed the selection.
pub type SelectionListener = Box<dyn FnMut(CursorState)>;

/// An editing session over one buffer.
pub struct Editor {
    buffer: Buffer,
    highlighter: Highlighter,
    cursor: CursorState,
    undo: UndoStack,
    config: EditorConfig,
    line_listeners: Vec<LineListener>,
    selection_listeners: Vec<SelectionListener>,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config("", EditorConfig::default())
    }

    pub fn with_text(text: &str) -> Self {
        Self::with_config(text, EditorConfig::default())
    }

    pub fn with_config(text: &str, config: EditorConfig) -> Self {
        let mut highlighter = Highlighter::new();
        highlighter.set_incremental(config.incremental_highlight);
        let mut editor = Self {
            buffer: Buffer::from_text(text),
            highlighter,
            cursor: CursorState::default(),
            undo: UndoStack::with_max_depth(config.undo_depth),
            config,
            line_listeners: Vec::new(),
            selection_listeners: Vec::new(),
        };
        editor.flush_damage();
        editor
    }

    /// Replace the highlighter and retokenize the whole buffer.
    pub fn set_highlighter(&mut self, mut highlighter: Highlighter) {
        highlighter.set_incremental(self.config.incremental_highlight);
        self.highlighter = highlighter;
        let count = self.buffer.line_count();
        self.highlighter.lines_changed(&mut self.buffer, 0, count);
        let _ = self.buffer.take_damage();
        self.fire_lines_changed(0, count);
    }

    // === Queries ===

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line_text(&self, row: usize) -> &str {
        self.buffer.line_text(row)
    }

    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    pub fn token_at(&self, row: usize, col: usize) -> Token {
        self.highlighter.token_at(&self.buffer, row, col)
    }

    pub fn style_at(&self, row: usize, col: usize) -> Option<Style> {
        self.highlighter.style_at(&self.buffer, row, col)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Caret position as a char index into its line, regardless of mode.
    pub fn caret_char_index(&self) -> (usize, usize) {
        let row = self.cursor.caret.row;
        let col = match self.cursor.mode {
            SelectionMode::Normal => self.cursor.caret.col,
            SelectionMode::Rect => column_to_index(
                self.buffer.line_text(row),
                self.cursor.caret.col,
                self.config.tab_width,
            ),
        };
        (row, col)
    }

    /// Caret position as a visual column, regardless of mode.
    pub fn caret_visual_column(&self) -> (usize, usize) {
        let row = self.cursor.caret.row;
        let col = match self.cursor.mode {
            SelectionMode::Normal => index_to_column(
                self.buffer.line_text(row),
                self.cursor.caret.col,
                self.config.tab_width,
            ),
            SelectionMode::Rect => self.cursor.caret.col,
        };
        (row, col)
    }

    /// Toggle insert vs overwrite typing.
    pub fn set_insert_mode(&mut self, insert: bool) {
        self.cursor.caret.insert = insert;
    }

    // === Listeners ===

    pub fn on_lines_changed(&mut self, listener: impl FnMut(usize, usize) + 'static) {
        self.line_listeners.push(Box::new(listener));
    }

    pub fn on_selection_changed(&mut self, listener: impl FnMut(CursorState) + 'static) {
        self.selection_listeners.push(Box::new(listener));
    }

    // === Typing ===

    /// Type one character at the caret, replacing any selection. In
    /// rectangular mode the character is typed once per spanned row.
    pub fn type_char(&mut self, ch: char) {
        if ch == '\n' {
            return self.enter();
        }
        let tag = if ch == ' ' { OpTag::Space } else { OpTag::Typed };
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);

        match self.cursor.mode {
            SelectionMode::Normal => {
                self.delete_selected();
                let row = self.cursor.caret.row;
                let col = self.cursor.caret.col;
                if !self.cursor.caret.insert && col < self.buffer.line_len(row) {
                    self.buffer.delete_in_line(row, col, col + 1);
                }
                let mut tmp = [0u8; 4];
                self.buffer.insert_in_line(row, col, ch.encode_utf8(&mut tmp));
                self.set_caret(row, col + 1);
                self.cursor.deselect();
                self.commit(patch, tag, row);
            }
            SelectionMode::Rect => {
                let (start, end) = self.cursor.row_span();
                let (min_col, max_col) = self.cursor.col_span();
                let tab = self.config.tab_width;
                let mut tmp = [0u8; 4];
                let text = ch.encode_utf8(&mut tmp).to_string();
                let caret_row = self.cursor.caret.row;
                let mut caret_ix = 0;
                for row in start..=end {
                    let len = self.buffer.line_len(row);
                    let line = self.buffer.line_text(row);
                    let a = column_to_index_unsafe(line, min_col, tab).min(len);
                    let b = column_to_index_unsafe(line, max_col, tab).min(len);
                    if a < b {
                        self.buffer.delete_in_line(row, a, b);
                    }
                    self.buffer.insert_in_line(row, a, &text);
                    if row == caret_row {
                        caret_ix = a + 1;
                    }
                }
                // Visual width of the typed character depends on the row
                // it landed in (a tab advances to the next stop).
                let col = index_to_column(self.buffer.line_text(caret_row), caret_ix, tab);
                self.cursor.caret.col = col;
                self.cursor.caret.col_width = col;
                self.cursor.deselect();
                self.commit(patch, tag, end);
            }
        }
    }

    /// Break the line at the caret, carrying the head line's leading
    /// whitespace onto the new line.
    pub fn enter(&mut self) {
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        self.collapse_to_normal();
        self.delete_selected();
        let row = self.cursor.caret.row;
        let col = self.cursor.caret.col;
        self.buffer.split_line(row, col);

        let indent: String = self
            .buffer
            .line_text(row)
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        let indent_len = indent.chars().count();
        if !indent.is_empty() {
            self.buffer.insert_in_line(row + 1, 0, &indent);
        }
        self.set_caret(row + 1, indent_len);
        self.cursor.deselect();
        self.commit(patch, OpTag::Enter, row + 1);
    }

    /// Delete the selection, or the character before the caret. In
    /// rectangular mode with an empty selection, one column is shaved
    /// off every spanned row.
    pub fn backspace(&mut self) {
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        if !self.cursor.is_empty() {
            self.delete_selected();
            let end = self.cursor.caret.row;
            return self.commit(patch, OpTag::Backspace, end);
        }
        match self.cursor.mode {
            SelectionMode::Normal => {
                let row = self.cursor.caret.row;
                let col = self.cursor.caret.col;
                if col > 0 {
                    self.buffer.delete_in_line(row, col - 1, col);
                    self.set_caret(row, col - 1);
                } else if row > 0 {
                    let prev_len = self.buffer.line_len(row - 1);
                    self.buffer.join_lines(row - 1);
                    self.set_caret(row - 1, prev_len);
                } else {
                    return;
                }
                self.cursor.deselect();
                let end = self.cursor.caret.row;
                self.commit(patch, OpTag::Backspace, end);
            }
            SelectionMode::Rect => {
                let col = self.cursor.caret.col;
                if col == 0 {
                    return;
                }
                let (start, end) = self.cursor.row_span();
                let tab = self.config.tab_width;
                for row in start..=end {
                    let len = self.buffer.line_len(row);
                    let line = self.buffer.line_text(row);
                    let a = column_to_index_unsafe(line, col - 1, tab).min(len);
                    let b = column_to_index_unsafe(line, col, tab).min(len);
                    if a < b {
                        self.buffer.delete_in_line(row, a, b);
                    }
                }
                self.cursor.caret.col = col - 1;
                self.cursor.anchor.col = col - 1;
                self.commit(patch, OpTag::Backspace, end);
            }
        }
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        if !self.cursor.is_empty() {
            self.delete_selected();
            let end = self.cursor.caret.row;
            return self.commit(patch, OpTag::Delete, end);
        }
        match self.cursor.mode {
            SelectionMode::Normal => {
                let row = self.cursor.caret.row;
                let col = self.cursor.caret.col;
                if col < self.buffer.line_len(row) {
                    self.buffer.delete_in_line(row, col, col + 1);
                } else if row + 1 < self.buffer.line_count() {
                    self.buffer.join_lines(row);
                } else {
                    return;
                }
                self.commit(patch, OpTag::Delete, row);
            }
            SelectionMode::Rect => {
                let col = self.cursor.caret.col;
                let (start, end) = self.cursor.row_span();
                let tab = self.config.tab_width;
                for row in start..=end {
                    let len = self.buffer.line_len(row);
                    let line = self.buffer.line_text(row);
                    let a = column_to_index_unsafe(line, col, tab).min(len);
                    let b = column_to_index_unsafe(line, col + 1, tab).min(len);
                    if a < b {
                        self.buffer.delete_in_line(row, a, b);
                    }
                }
                self.commit(patch, OpTag::Delete, end);
            }
        }
    }

    /// Delete the selected region, if any, as one undo step.
    pub fn delete_selection(&mut self) {
        if self.cursor.is_empty() {
            return;
        }
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        self.delete_selected();
        let end = self.cursor.caret.row;
        self.commit(patch, OpTag::Delete, end);
    }

    /// Delete from the caret back through the same-kind character run
    /// (word-wise backspace). Falls back to a plain backspace on a
    /// selection, in rectangular mode, or at a line start.
    pub fn backspace_word(&mut self) {
        if !self.cursor.is_empty() || self.cursor.mode == SelectionMode::Rect {
            return self.backspace();
        }
        let row = self.cursor.caret.row;
        let col = self.cursor.caret.col;
        if col == 0 {
            return self.backspace();
        }
        let (start, _) = word_bounds(self.buffer.line_text(row), col - 1);
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        self.buffer.delete_in_line(row, start, col);
        self.set_caret(row, start);
        self.cursor.deselect();
        self.commit(patch, OpTag::Backspace, row);
    }

    /// Insert a possibly multi-line string at the caret, replacing any
    /// selection. CR characters are stripped.
    pub fn insert_text(&mut self, text: &str) {
        let patch = UndoPatch::begin(&self.buffer, &self.cursor);
        self.collapse_to_normal();
        self.delete_selected();
        let row = self.cursor.caret.row;
        let col = self.cursor.caret.col;

        let text = text.replace('\r', "");
        let parts: Vec<&str> = text.split('\n').collect();
        if parts.len() == 1 {
            self.buffer.insert_in_line(row, col, parts[0]);
            self.set_caret(row, col + parts[0].chars().count());
        } else {
            self.buffer.split_line(row, col);
            self.buffer.insert_in_line(row, col, parts[0]);
            for (k, part) in parts[1..parts.len() - 1].iter().enumerate() {
                self.buffer.insert_line(row + 1 + k, *part);
            }
            let last_row = row + parts.len() - 1;
            let last = parts[parts.len() - 1];
            self.buffer.insert_in_line(last_row, 0, last);
            self.set_caret(last_row, last.chars().count());
        }
        self.cursor.deselect();
        let end = self.cursor.caret.row;
        self.commit(patch, OpTag::Paste, end);
    }

    /// Selected text, joined with newlines. Rectangular selections yield
    /// one piece per row, clamped to each row's length.
    pub fn selected_text(&self) -> String {
        if self.cursor.is_empty() {
            return String::new();
        }
        match self.cursor.mode {
            SelectionMode::Normal => {
                let ((sr, sc), (er, ec)) = self.cursor.ordered();
                if sr == er {
                    return slice_chars(self.buffer.line_text(sr), sc, ec);
                }
                let mut out = slice_chars(
                    self.buffer.line_text(sr),
                    sc,
                    self.buffer.line_len(sr),
                );
                for row in sr + 1..er {
                    out.push('\n');
                    out.push_str(self.buffer.line_text(row));
                }
                out.push('\n');
                out.push_str(&slice_chars(self.buffer.line_text(er), 0, ec));
                out
            }
            SelectionMode::Rect => {
                let (start, end) = self.cursor.row_span();
                let (min_col, max_col) = self.cursor.col_span();
                let tab = self.config.tab_width;
                let mut pieces = Vec::with_capacity(end - start + 1);
                for row in start..=end {
                    let len = self.buffer.line_len(row);
                    let line = self.buffer.line_text(row);
                    let a = column_to_index_unsafe(line, min_col, tab).min(len);
                    let b = column_to_index_unsafe(line, max_col, tab).min(len);
                    pieces.push(slice_chars(line, a, b));
                }
                pieces.join("\n")
            }
        }
    }

    // === Line operations ===

    /// Prepend one tab to every line the selection touches.
    pub fn indent(&mut self) {
        let (start, end) = self.cursor.row_span();
        let patch = UndoPatch::begin_rows(&self.buffer, &self.cursor, start, end);
        for row in start..=end {
            self.buffer.insert_in_line(row, 0, "\t");
        }
        if self.cursor.mode == SelectionMode::Normal {
            self.cursor.caret.col += 1;
            self.cursor.anchor.col += 1;
        }
        self.commit(patch, OpTag::Indent, end);
    }

    /// Strip one leading tab, or up to a tab stop of leading spaces,
    /// from every line the selection touches.
    pub fn unindent(&mut self) {
        let (start, end) = self.cursor.row_span();
        let patch = UndoPatch::begin_rows(&self.buffer, &self.cursor, start, end);
        let mut moved = false;
        for row in start..=end {
            let line = self.buffer.line_text(row);
            let removed = if line.starts_with('\t') {
                1
            } else {
                line.chars()
                    .take(self.config.tab_width)
                    .take_while(|c| *c == ' ')
                    .count()
            };
            if removed > 0 {
                self.buffer.delete_in_line(row, 0, removed);
                if self.cursor.mode == SelectionMode::Normal {
                    if row == self.cursor.caret.row {
                        self.cursor.caret.col = self.cursor.caret.col.saturating_sub(removed);
                        moved = true;
                    }
                    if row == self.cursor.anchor.row {
                        self.cursor.anchor.col = self.cursor.anchor.col.saturating_sub(removed);
                    }
                }
            }
        }
        if moved {
            let row = self.cursor.caret.row;
            let col = self.cursor.caret.col;
            self.set_caret(row, col);
        }
        self.commit(patch, OpTag::Indent, end);
    }

    /// Duplicate the lines the selection touches, inserting the copies
    /// directly below.
    pub fn duplicate_lines(&mut self) {
        let (start, end) = self.cursor.row_span();
        let patch = UndoPatch::begin_rows(&self.buffer, &self.cursor, start, end);
        let copies: Vec<String> = (start..=end)
            .map(|r| self.buffer.line_text(r).to_string())
            .collect();
        for (k, text) in copies.into_iter().enumerate() {
            self.buffer.insert_line(end + 1 + k, text);
        }
        let new_end = end + (end - start + 1);
        self.commit(patch, OpTag::Duplicate, new_end);
    }

    // === Selection gestures ===

    /// Place the caret, collapsing any selection.
    pub fn click(&mut self, row: usize, col: usize) {
        let row = row.min(self.buffer.line_count() - 1);
        let col = col.min(self.buffer.line_len(row));
        self.cursor.mode = SelectionMode::Normal;
        self.cursor.word_anchor.valid = false;
        self.set_caret(row, col);
        self.cursor.deselect();
        self.fire_selection_changed();
    }

    /// Extend the selection from the existing anchor to a new caret
    /// position, honoring a word anchor when one is set.
    pub fn drag_to(&mut self, row: usize, col: usize) {
        let row = row.min(self.buffer.line_count() - 1);
        match self.cursor.mode {
            SelectionMode::Normal => {
                let col = col.min(self.buffer.line_len(row));
                self.cursor.caret.row = row;
                self.cursor.caret.col = col;
                self.apply_word_anchor();
                let row = self.cursor.caret.row;
                let col = self.cursor.caret.col;
                self.set_caret(row, col);
            }
            SelectionMode::Rect => {
                self.cursor.caret.row = row;
                self.cursor.caret.col = col;
                self.apply_word_anchor();
            }
        }
        self.fire_selection_changed();
    }

    /// Extend the selection from the existing anchor to a clicked
    /// position; same semantics as a drag.
    pub fn shift_click(&mut self, row: usize, col: usize) {
        self.drag_to(row, col);
    }

    /// Begin a rectangular selection anchored at a visual column.
    pub fn begin_rect(&mut self, row: usize, visual_col: usize) {
        let row = row.min(self.buffer.line_count() - 1);
        self.cursor.mode = SelectionMode::Rect;
        self.cursor.word_anchor.valid = false;
        self.cursor.caret.row = row;
        self.cursor.caret.col = visual_col;
        self.cursor.caret.col_width = visual_col;
        self.cursor.deselect();
        self.fire_selection_changed();
    }

    /// Select the word under `(row, col)` and arm the word anchor so a
    /// following drag extends word-wise.
    pub fn select_word_at(&mut self, row: usize, col: usize) {
        let row = row.min(self.buffer.line_count() - 1);
        let (start, end) = word_bounds(self.buffer.line_text(row), col);
        self.cursor.mode = SelectionMode::Normal;
        self.cursor.anchor.row = row;
        self.cursor.anchor.col = start;
        self.set_caret(row, end);
        self.cursor.word_anchor.valid = true;
        self.cursor.word_anchor.row = row;
        self.cursor.word_anchor.start = start;
        self.cursor.word_anchor.end = end;
        self.fire_selection_changed();
    }

    pub fn select_all(&mut self) {
        self.cursor.mode = SelectionMode::Normal;
        self.cursor.word_anchor.valid = false;
        self.cursor.anchor.row = 0;
        self.cursor.anchor.col = 0;
        let last = self.buffer.line_count() - 1;
        self.set_caret(last, self.buffer.line_len(last));
        self.fire_selection_changed();
    }

    pub fn deselect(&mut self) {
        self.cursor.deselect();
        self.cursor.word_anchor.valid = false;
        self.fire_selection_changed();
    }

    // === Caret motion ===

    /// Move the caret one char left/right (`delta` of -1 or 1), wrapping
    /// across line boundaries in normal mode. `select` keeps the anchor.
    pub fn move_horizontal(&mut self, delta: isize, select: bool) {
        match self.cursor.mode {
            SelectionMode::Normal => {
                let mut row = self.cursor.caret.row;
                let mut col = self.cursor.caret.col;
                if delta < 0 {
                    if col > 0 {
                        col -= 1;
                    } else if row > 0 {
                        row -= 1;
                        col = self.buffer.line_len(row);
                    }
                } else if col < self.buffer.line_len(row) {
                    col += 1;
                } else if row + 1 < self.buffer.line_count() {
                    row += 1;
                    col = 0;
                }
                self.set_caret(row, col);
            }
            SelectionMode::Rect => {
                let col = self.cursor.caret.col;
                self.cursor.caret.col = if delta < 0 { col.saturating_sub(1) } else { col + 1 };
                self.cursor.caret.col_width = self.cursor.caret.col;
            }
        }
        if !select {
            self.cursor.deselect();
        }
        self.fire_selection_changed();
    }

    /// Move the caret vertically, re-projecting the cached visual width
    /// onto the target line so tabs do not make the caret wander.
    pub fn move_vertical(&mut self, delta: isize, select: bool) {
        let row = self.cursor.caret.row;
        let target = if delta < 0 {
            row.saturating_sub(delta.unsigned_abs())
        } else {
            (row + delta as usize).min(self.buffer.line_count() - 1)
        };
        self.cursor.caret.row = target;
        if self.cursor.mode == SelectionMode::Normal {
            self.cursor.caret.col = column_to_index(
                self.buffer.line_text(target),
                self.cursor.caret.col_width,
                self.config.tab_width,
            );
        }
        if !select {
            self.cursor.deselect();
        }
        self.fire_selection_changed();
    }

    // === Undo ===

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.undo.undo(&mut self.buffer) {
            snapshot.restore(&mut self.cursor);
            self.flush_damage();
            self.clamp_caret();
            self.fire_selection_changed();
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.undo.redo(&mut self.buffer) {
            snapshot.restore(&mut self.cursor);
            self.flush_damage();
            self.clamp_caret();
            self.fire_selection_changed();
        }
    }

    // === Internals ===

    /// Delete the selected region and collapse onto its start. Callers
    /// hold an open patch; this only mutates buffer and cursor.
    fn delete_selected(&mut self) -> bool {
        if self.cursor.is_empty() {
            return false;
        }
        match self.cursor.mode {
            SelectionMode::Normal => {
                let ((sr, sc), (er, ec)) = self.cursor.ordered();
                if sr == er {
                    self.buffer.delete_in_line(sr, sc, ec);
                } else {
                    let head = slice_chars(self.buffer.line_text(sr), 0, sc);
                    let tail = slice_chars(
                        self.buffer.line_text(er),
                        ec,
                        self.buffer.line_len(er),
                    );
                    self.buffer.replace_line(sr, head + &tail);
                    for _ in sr + 1..=er {
                        self.buffer.remove_line(sr + 1);
                    }
                }
                self.set_caret(sr, sc);
                self.cursor.deselect();
            }
            SelectionMode::Rect => {
                let (start, end) = self.cursor.row_span();
                let (min_col, max_col) = self.cursor.col_span();
                let tab = self.config.tab_width;
                for row in start..=end {
                    let len = self.buffer.line_len(row);
                    let line = self.buffer.line_text(row);
                    let a = column_to_index_unsafe(line, min_col, tab).min(len);
                    let b = column_to_index_unsafe(line, max_col, tab).min(len);
                    if a < b {
                        self.buffer.delete_in_line(row, a, b);
                    }
                }
                self.cursor.caret.col = min_col;
                self.cursor.caret.col_width = min_col;
                self.cursor.anchor.col = min_col;
            }
        }
        true
    }

    /// Leave rectangular mode. A non-empty rectangle is spliced out
    /// first, leaving the caret at the interval's left edge; the caret's
    /// visual column is then converted back to a char index.
    fn collapse_to_normal(&mut self) {
        if self.cursor.mode != SelectionMode::Rect {
            return;
        }
        self.delete_selected();
        let row = self.cursor.caret.row;
        let col = column_to_index(
            self.buffer.line_text(row),
            self.cursor.caret.col,
            self.config.tab_width,
        );
        self.cursor.change_mode(SelectionMode::Normal, col);
        self.set_caret(row, col);
    }

    /// Constrain a drag so the word captured on double-click stays fully
    /// selected, snapping the caret-side end to word boundaries.
    fn apply_word_anchor(&mut self) {
        let wa = self.cursor.word_anchor;
        if !wa.valid {
            return;
        }
        match self.cursor.mode {
            SelectionMode::Normal => {
                let row = self.cursor.caret.row;
                let col = self.cursor.caret.col;
                let line = self.buffer.line_text(row);
                let (ws, we) = word_bounds(line, col.min(self.buffer.line_len(row)));
                if row > wa.row || (row == wa.row && col > wa.start) {
                    self.cursor.anchor.row = wa.row;
                    self.cursor.anchor.col = wa.start;
                    self.cursor.caret.col = if row == wa.row { we.max(wa.end) } else { we };
                } else {
                    self.cursor.anchor.row = wa.row;
                    self.cursor.anchor.col = wa.end;
                    self.cursor.caret.col = ws;
                }
            }
            SelectionMode::Rect => {
                if self.cursor.caret.col < wa.start {
                    self.cursor.anchor.col = self.cursor.anchor.col.max(wa.end);
                } else {
                    self.cursor.anchor.col = self.cursor.anchor.col.min(wa.start);
                    self.cursor.caret.col = self.cursor.caret.col.max(wa.end);
                }
            }
        }
    }

    /// Normal-mode caret placement, refreshing the cached visual width.
    fn set_caret(&mut self, row: usize, col: usize) {
        self.cursor.caret.row = row;
        self.cursor.caret.col = col;
        self.cursor.caret.col_width =
            index_to_column(self.buffer.line_text(row), col, self.config.tab_width);
    }

    fn clamp_caret(&mut self) {
        let last = self.buffer.line_count() - 1;
        if self.cursor.caret.row > last {
            self.cursor.caret.row = last;
        }
        if self.cursor.anchor.row > last {
            self.cursor.anchor.row = last;
        }
        if self.cursor.mode == SelectionMode::Normal {
            let len = self.buffer.line_len(self.cursor.caret.row);
            if self.cursor.caret.col > len {
                self.cursor.caret.col = len;
            }
            let len = self.buffer.line_len(self.cursor.anchor.row);
            if self.cursor.anchor.col > len {
                self.cursor.anchor.col = len;
            }
        }
    }

    /// Finish an edit: revalidate highlighting over the damaged range,
    /// complete and store the undo patch, notify listeners.
    fn commit(&mut self, mut patch: UndoPatch, tag: OpTag, end_row: usize) {
        self.flush_damage();
        patch.realize(&self.buffer, &self.cursor, end_row);
        patch.tag = tag;
        if patch.is_effective() {
            self.undo.store(patch);
        }
        self.fire_selection_changed();
    }

    fn flush_damage(&mut self) {
        if let Some((start, end)) = self.buffer.take_damage() {
            self.highlighter.lines_changed(&mut self.buffer, start, end);
            self.fire_lines_changed(start, end);
        }
    }

    fn fire_lines_changed(&mut self, start: usize, end: usize) {
        for listener in &mut self.line_listeners {
            listener(start, end);
        }
    }

    fn fire_selection_changed(&mut self) {
        let snapshot = self.cursor;
        for listener in &mut self.selection_listeners {
            listener(snapshot);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("lines", &self.buffer.line_count())
            .field("cursor", &self.cursor)
            .field("can_undo", &self.can_undo())
            .field("can_redo", &self.can_redo())
            .finish()
    }
}

/// Substring by char indices.
fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}
