//! Caret position with cached visual width
//!
//! `col` is a char index while the selection is in normal mode and a
//! visual column in rectangular mode, matching how the two modes address
//! text. `col_width` caches the caret's visual width so vertical motion
//! can re-project onto lines with different tab layout without going back
//! to a raster position.

/// The insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub row: usize,
    /// Char index (normal mode) or visual column (rectangular mode).
    pub col: usize,
    /// Cached visual width of the caret column, in cells.
    pub col_width: usize,
    /// Insert vs overwrite typing.
    pub insert: bool,
}

impl Caret {
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            col_width: 0,
            insert: true,
        }
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
