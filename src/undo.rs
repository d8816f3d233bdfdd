//! Patch-based undo/redo with coalescing
//!
//! Each logical edit is recorded as an [`UndoPatch`]: deep before/after
//! snapshots of the touched line range plus the caret/selection state on
//! both sides. Snapshots are owned copies; they never alias live buffer
//! lines. Compatible consecutive patches merge, so a run of typed
//! characters undoes as one step, while structural edits (line count
//! changed) always stand alone.

use crate::buffer::Buffer;
use crate::selection::{CursorState, SelectionMode};

/// Classification of the edit a patch records, used by the coalescing
/// compatibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpTag {
    #[default]
    Other,
    Typed,
    Backspace,
    Delete,
    /// Space is compatible with any tag, so a space continues a run.
    Space,
    Enter,
    Paste,
    Indent,
    Duplicate,
}

/// Caret/selection coordinates captured around an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretSnapshot {
    pub caret_row: usize,
    pub caret_col: usize,
    pub anchor_row: usize,
    pub anchor_col: usize,
    pub mode: SelectionMode,
}

impl CaretSnapshot {
    pub fn grab(cursor: &CursorState) -> Self {
        Self {
            caret_row: cursor.caret.row,
            caret_col: cursor.caret.col,
            anchor_row: cursor.anchor.row,
            anchor_col: cursor.anchor.col,
            mode: cursor.mode,
        }
    }

    pub fn restore(&self, cursor: &mut CursorState) {
        cursor.caret.row = self.caret_row;
        cursor.caret.col = self.caret_col;
        cursor.anchor.row = self.anchor_row;
        cursor.anchor.col = self.anchor_col;
        cursor.mode = self.mode;
        cursor.word_anchor.valid = false;
    }
}

/// Before/after snapshot of a contiguous line range, the unit of
/// undo/redo. Line counts may differ when the edit split or joined lines.
#[derive(Debug, Clone)]
pub struct UndoPatch {
    pub start_row: usize,
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
    pub tag: OpTag,
    pub before: CaretSnapshot,
    pub after: CaretSnapshot,
}

impl UndoPatch {
    /// Snapshot the selection's row span (pre-edit) and the current
    /// cursor state. The edit runs after this; [`realize`] completes the
    /// patch.
    ///
    /// [`realize`]: UndoPatch::realize
    pub fn begin(buffer: &Buffer, cursor: &CursorState) -> Self {
        let (start, end) = cursor.row_span();
        Self::begin_rows(buffer, cursor, start, end)
    }

    /// Snapshot an explicit inclusive row range.
    pub fn begin_rows(buffer: &Buffer, cursor: &CursorState, start_row: usize, end_row: usize) -> Self {
        let start_row = start_row.min(buffer.line_count() - 1);
        let end_row = end_row.min(buffer.line_count() - 1);
        let old_lines = (start_row..=end_row)
            .map(|r| buffer.line_text(r).to_string())
            .collect();
        Self {
            start_row,
            old_lines,
            new_lines: Vec::new(),
            tag: OpTag::Other,
            before: CaretSnapshot::grab(cursor),
            after: CaretSnapshot::default(),
        }
    }

    /// Complete the patch after the edit: snapshot `start_row..=end_row`
    /// and the post-edit cursor state.
    pub fn realize(&mut self, buffer: &Buffer, cursor: &CursorState, end_row: usize) {
        let end_row = end_row.min(buffer.line_count() - 1).max(self.start_row);
        self.new_lines = (self.start_row..=end_row)
            .map(|r| buffer.line_text(r).to_string())
            .collect();
        self.after = CaretSnapshot::grab(cursor);
    }

    /// True when this patch changed the buffer at all.
    pub fn is_effective(&self) -> bool {
        self.old_lines != self.new_lines
    }
}

/// Linear undo history: an ordered patch list plus a cursor one past the
/// last applied patch. New edits discard everything beyond the cursor.
#[derive(Debug, Default)]
pub struct UndoStack {
    patches: Vec<UndoPatch>,
    patch_index: usize,
    max_depth: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_depth(1000)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            patches: Vec::new(),
            patch_index: 0,
            max_depth,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.patch_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.patch_index < self.patches.len()
    }

    /// Number of undoable steps.
    pub fn depth(&self) -> usize {
        self.patch_index
    }

    /// Commit a realized patch: truncate the redo branch, then push, or
    /// merge into the preceding patch when the two are compatible.
    pub fn store(&mut self, patch: UndoPatch) {
        self.patches.truncate(self.patch_index);
        if self.patch_index == 0 || !compatible(&self.patches[self.patch_index - 1], &patch) {
            self.patches.push(patch);
            self.patch_index += 1;
            if self.patches.len() > self.max_depth {
                self.patches.remove(0);
                self.patch_index -= 1;
            }
        } else {
            tracing::debug!(tag = ?patch.tag, "coalescing into previous undo step");
            merge(&mut self.patches[self.patch_index - 1], patch);
        }
    }

    /// Reverse the most recent patch against the buffer. Returns the
    /// pre-edit cursor snapshot to restore, or None at the stack bottom.
    pub fn undo(&mut self, buffer: &mut Buffer) -> Option<CaretSnapshot> {
        if self.patch_index == 0 {
            return None;
        }
        self.patch_index -= 1;
        let patch = &self.patches[self.patch_index];
        splice(buffer, patch.start_row, patch.new_lines.len(), &patch.old_lines);
        Some(patch.before)
    }

    /// Re-apply the next patch. Returns the post-edit cursor snapshot,
    /// or None at the stack top.
    pub fn redo(&mut self, buffer: &mut Buffer) -> Option<CaretSnapshot> {
        if self.patch_index >= self.patches.len() {
            return None;
        }
        let patch = &self.patches[self.patch_index];
        self.patch_index += 1;
        splice(buffer, patch.start_row, patch.old_lines.len(), &patch.new_lines);
        Some(patch.after)
    }
}

/// Replace `count` lines at `start_row` with `lines`, inserting or
/// removing as the counts differ.
fn splice(buffer: &mut Buffer, start_row: usize, count: usize, lines: &[String]) {
    let shared = count.min(lines.len());
    for (i, line) in lines.iter().take(shared).enumerate() {
        buffer.replace_line(start_row + i, line.clone());
    }
    for _ in shared..count {
        buffer.remove_line(start_row + shared);
    }
    for (i, line) in lines.iter().enumerate().skip(shared) {
        buffer.insert_line(start_row + i, line.clone());
    }
}

/// Two adjacent patches coalesce only when they target the same row,
/// their tags match (or the newer one is Space), and their snapshot
/// shapes are identical. Structural patches never merge.
fn compatible(prev: &UndoPatch, next: &UndoPatch) -> bool {
    if (prev.tag != next.tag && next.tag != OpTag::Space) || prev.start_row != next.start_row {
        return false;
    }
    prev.old_lines.len() == next.old_lines.len() && prev.new_lines.len() == next.new_lines.len()
}

/// Fold `patch` into `into`: adopt the newer after-image, cursor state,
/// and tag, keeping the older before-image.
fn merge(into: &mut UndoPatch, patch: UndoPatch) {
    if let (Some(slot), Some(first)) = (into.new_lines.first_mut(), patch.new_lines.into_iter().next()) {
        *slot = first;
    }
    into.after = patch.after;
    into.tag = patch.tag;
}
