//! Tab-aware visual column arithmetic
//!
//! A *visual column* is the horizontal cell position after tab expansion;
//! a *char index* counts characters in the line. Plain characters advance
//! the visual position by one, a tab advances it to the next multiple of
//! the tab width. Each conversion re-derives the walk from the start of
//! the line; there is no cached per-line table.

/// Visual column that begins the character at `index`.
///
/// `index` past the end of the line is clamped to the line length.
pub fn index_to_column(text: &str, index: usize, tab_width: usize) -> usize {
    let mut col = 0;
    for ch in text.chars().take(index) {
        if ch == '\t' {
            col = next_tab_stop(col, tab_width);
        } else {
            col += 1;
        }
    }
    col
}

/// Char index of the character occupying visual column `col`.
///
/// A column inside a tab's expansion resolves to the index just past the
/// tab; a column past the end of the line resolves to the line length.
pub fn column_to_index(text: &str, col: usize, tab_width: usize) -> usize {
    let mut index = 0;
    let mut v = 0;
    for ch in text.chars() {
        if v >= col {
            break;
        }
        if ch == '\t' {
            v = next_tab_stop(v, tab_width);
        } else {
            v += 1;
        }
        index += 1;
    }
    index
}

/// Like [`column_to_index`], but extends past the end of the line: columns
/// beyond the last character keep counting one index per column. Used for
/// rectangular selection columns over rows shorter than the column span.
pub fn column_to_index_unsafe(text: &str, col: usize, tab_width: usize) -> usize {
    let mut index = 0;
    let mut v = 0;
    for ch in text.chars() {
        if v >= col {
            break;
        }
        if ch == '\t' {
            v = next_tab_stop(v, tab_width);
        } else {
            v += 1;
        }
        index += 1;
    }
    // Past end of line the mapping is one column per missing character.
    if v < col {
        index + (col - v)
    } else {
        index
    }
}

/// True when `col` falls strictly inside a tab's expansion on this line.
pub fn column_in_tab(text: &str, col: usize, tab_width: usize) -> bool {
    let mut v = 0;
    for ch in text.chars() {
        if v >= col {
            break;
        }
        if ch == '\t' {
            v = next_tab_stop(v, tab_width);
            if v > col {
                return true;
            }
        } else {
            v += 1;
        }
    }
    false
}

#[inline]
fn next_tab_stop(col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    (col / tab_width + 1) * tab_width
}
