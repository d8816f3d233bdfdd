//! Line-oriented text buffer
//!
//! A [`Buffer`] is a dense, ordered sequence of [`Line`]s; it always holds
//! at least one line. Each line carries a packed attribute word used by
//! the highlighter: the sign bit doubles as a dirty flag and the bits
//! above [`ATTR_SCHEME_SHIFT`] store the id of the block scheme open when
//! the line is entered (0 = none). Negating preserves the pre-invalidation
//! word, so a dirty line remembers its last known state.
//!
//! Every mutation records the `[start, end)` range of affected line
//! indices. The owning editor session drains that damage and dispatches it
//! to the highlighter and to registered listeners synchronously, before
//! the triggering edit call returns.

use crate::chars::char_to_byte;

/// Bit offset of the open-scheme id within a line attribute word.
/// The low bits are reserved for per-line flags.
pub const ATTR_SCHEME_SHIFT: u32 = 4;

/// One line of text plus its highlighter attribute word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    attr: i32,
}

impl Line {
    /// New lines start dirty; the highlighter has never seen them.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attr: -1,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the line must be retokenized before it can be styled.
    pub fn is_dirty(&self) -> bool {
        self.attr < 0
    }

    /// Flip the attribute negative, keeping the magnitude so the line
    /// remembers its pre-invalidation state.
    pub fn mark_dirty(&mut self) {
        if self.attr > 0 {
            self.attr = -self.attr;
        } else if self.attr == 0 {
            self.attr = -1;
        }
    }

    /// Id of the scheme open when this line is entered (0 = none).
    /// Dirty lines report no open scheme.
    pub fn open_scheme(&self) -> usize {
        if self.attr < 0 {
            0
        } else {
            (self.attr >> ATTR_SCHEME_SHIFT) as usize
        }
    }

    /// Store the entering open-scheme id, clearing the dirty flag.
    pub fn set_open_scheme(&mut self, id: usize) {
        self.attr = (id as i32) << ATTR_SCHEME_SHIFT;
    }

    /// Open-scheme id recorded before invalidation, for dirty lines.
    pub fn stale_open_scheme(&self) -> usize {
        (self.attr.unsigned_abs() >> ATTR_SCHEME_SHIFT) as usize
    }
}

/// Ordered collection of lines with damage-range accumulation.
#[derive(Debug)]
pub struct Buffer {
    lines: Vec<Line>,
    /// Pending `[start, end)` line range touched since the last drain.
    damage: Option<(usize, usize)>,
}

impl Buffer {
    /// A buffer holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new("")],
            damage: Some((0, 1)),
        }
    }

    /// Split `text` on `\n` into lines. CR is stripped so CRLF input
    /// loads cleanly; the buffer itself is LF-only.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<Line> = text
            .split('\n')
            .map(|l| Line::new(l.strip_suffix('\r').unwrap_or(l)))
            .collect();
        let count = lines.len().max(1);
        let mut buf = Self {
            lines,
            damage: Some((0, count)),
        };
        if buf.lines.is_empty() {
            buf.lines.push(Line::new(""));
        }
        buf
    }

    /// Join all lines with `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }

    /// Number of lines (always >= 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Line content; out-of-range indices read as empty.
    pub fn line_text(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", |l| l.text.as_str())
    }

    /// Length of a line in characters; out-of-range indices read as 0.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, Line::len)
    }

    /// Insert a line before `index` (clamped to line_count).
    pub fn insert_line(&mut self, index: usize, text: impl Into<String>) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, Line::new(text));
        self.touch(index, self.lines.len());
    }

    /// Remove and return the line at `index`.
    ///
    /// The buffer never drops to zero lines: removing the only line
    /// replaces it with an empty one and returns the original.
    pub fn remove_line(&mut self, index: usize) -> Line {
        if self.lines.len() == 1 {
            tracing::warn!("remove_line on the last line; clearing it instead");
            let old = std::mem::replace(&mut self.lines[0], Line::new(""));
            self.touch(0, 1);
            return old;
        }
        let index = index.min(self.lines.len() - 1);
        let removed = self.lines.remove(index);
        self.touch(index, self.lines.len().max(index + 1));
        removed
    }

    /// Replace the content of a line, marking it for retokenization.
    pub fn replace_line(&mut self, index: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.text = text.into();
            line.mark_dirty();
            self.touch(index, index + 1);
        }
    }

    /// Insert `text` (no newlines) into a line at a char index.
    pub fn insert_in_line(&mut self, index: usize, char_index: usize, text: &str) {
        debug_assert!(!text.contains('\n'));
        if let Some(line) = self.lines.get_mut(index) {
            let at = char_to_byte(&line.text, char_index);
            line.text.insert_str(at, text);
            line.mark_dirty();
            self.touch(index, index + 1);
        }
    }

    /// Delete the char range `[start, end)` from a line (clamped).
    pub fn delete_in_line(&mut self, index: usize, start: usize, end: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            let sb = char_to_byte(&line.text, start);
            let eb = char_to_byte(&line.text, end.max(start));
            if sb < eb {
                line.text.replace_range(sb..eb, "");
                line.mark_dirty();
                self.touch(index, index + 1);
            }
        }
    }

    /// Split a line at a char index; the tail becomes a new line below.
    pub fn split_line(&mut self, index: usize, char_index: usize) {
        if let Some(line) = self.lines.get_mut(index) {
            let at = char_to_byte(&line.text, char_index);
            let tail = line.text.split_off(at);
            line.mark_dirty();
            self.lines.insert(index + 1, Line::new(tail));
            self.touch(index, self.lines.len());
        }
    }

    /// Append line `index + 1` onto line `index` and remove it.
    pub fn join_lines(&mut self, index: usize) {
        if index + 1 < self.lines.len() {
            let tail = self.lines.remove(index + 1);
            let line = &mut self.lines[index];
            line.text.push_str(&tail.text);
            line.mark_dirty();
            self.touch(index, self.lines.len().max(index + 1));
        }
    }

    /// Take the accumulated damage range, leaving none pending.
    pub fn take_damage(&mut self) -> Option<(usize, usize)> {
        self.damage.take()
    }

    fn touch(&mut self, start: usize, end: usize) {
        self.damage = Some(match self.damage {
            Some((s, e)) => (s.min(start), e.max(end)),
            None => (start, end),
        });
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
