//! Selection anchor, modes, and the combined cursor state
//!
//! A selection is the region between the caret and a fixed anchor point.
//! In normal mode the two points bound a linear `(row, col)` range; in
//! rectangular mode they bound a column interval applied to every row in
//! between. The transient [`WordAnchor`] captures the word hit by a
//! double-click so drag extension keeps that word fully selected.

use crate::caret::Caret;

/// How the caret and anchor are interpreted as a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Linear range over `(row, col)` pairs compared lexicographically.
    #[default]
    Normal,
    /// Column interval applied independently to every spanned row.
    Rect,
}

/// The fixed end of the selection. `col` follows the caret convention:
/// char index in normal mode, visual column in rectangular mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
}

/// Word or click boundary captured on double-click / shift-click,
/// constraining how the far end of the selection extends during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordAnchor {
    pub valid: bool,
    pub row: usize,
    /// Char index where the anchored word starts.
    pub start: usize,
    /// Char index just past the anchored word.
    pub end: usize,
}

/// Caret, anchor, mode, and word anchor as one value, threaded through
/// every editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub caret: Caret,
    pub anchor: Anchor,
    pub mode: SelectionMode,
    pub word_anchor: WordAnchor,
}

impl CursorState {
    /// Collapse the selection onto the caret.
    pub fn deselect(&mut self) {
        self.anchor.row = self.caret.row;
        self.anchor.col = self.caret.col;
    }

    /// True when caret and anchor coincide (rectangular selections are
    /// empty only when the column interval is empty too).
    pub fn is_empty(&self) -> bool {
        match self.mode {
            SelectionMode::Normal => {
                self.caret.row == self.anchor.row && self.caret.col == self.anchor.col
            }
            SelectionMode::Rect => self.caret.col == self.anchor.col,
        }
    }

    /// Ordered `(start, end)` endpoints of a normal-mode selection.
    pub fn ordered(&self) -> ((usize, usize), (usize, usize)) {
        let c = (self.caret.row, self.caret.col);
        let a = (self.anchor.row, self.anchor.col);
        if a <= c {
            (a, c)
        } else {
            (c, a)
        }
    }

    /// Inclusive row span covered by the selection.
    pub fn row_span(&self) -> (usize, usize) {
        (
            self.caret.row.min(self.anchor.row),
            self.caret.row.max(self.anchor.row),
        )
    }

    /// Ordered column interval of a rectangular selection.
    pub fn col_span(&self) -> (usize, usize) {
        (
            self.caret.col.min(self.anchor.col),
            self.caret.col.max(self.anchor.col),
        )
    }

    /// Switch modes, collapsing the selection when the interpretation of
    /// `col` changes (char index vs visual column).
    pub fn change_mode(&mut self, mode: SelectionMode, caret_col_in_new_mode: usize) {
        if self.mode != mode {
            self.mode = mode;
            self.caret.col = caret_col_in_new_mode;
            self.deselect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(caret: (usize, usize), anchor: (usize, usize)) -> CursorState {
        CursorState {
            caret: Caret::new(caret.0, caret.1),
            anchor: Anchor {
                row: anchor.0,
                col: anchor.1,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_ordered_swaps_reversed_selection() {
        let fwd = state((0, 2), (0, 5));
        assert_eq!(fwd.ordered(), ((0, 2), (0, 5)));
        let rev = state((3, 1), (1, 4));
        assert_eq!(rev.ordered(), ((1, 4), (3, 1)));
    }

    #[test]
    fn test_is_empty_by_mode() {
        let mut s = state((2, 4), (5, 4));
        assert!(!s.is_empty());
        s.mode = SelectionMode::Rect;
        assert!(s.is_empty()); // same column interval, rows don't matter
    }

    #[test]
    fn test_deselect_collapses_to_caret() {
        let mut s = state((2, 4), (0, 0));
        s.deselect();
        assert!(s.is_empty());
        assert_eq!((s.anchor.row, s.anchor.col), (2, 4));
    }

    #[test]
    fn test_spans() {
        let s = state((4, 1), (1, 6));
        assert_eq!(s.row_span(), (1, 4));
        assert_eq!(s.col_span(), (1, 6));
    }

    #[test]
    fn test_change_mode_collapses() {
        let mut s = state((1, 3), (0, 0));
        s.change_mode(SelectionMode::Rect, 7);
        assert_eq!(s.mode, SelectionMode::Rect);
        assert_eq!(s.caret.col, 7);
        assert!(s.is_empty());
        // No-op when already in the requested mode
        s.anchor.col = 2;
        s.change_mode(SelectionMode::Rect, 0);
        assert_eq!(s.caret.col, 7);
    }
}
