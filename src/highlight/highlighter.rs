//! Incremental lexical highlighter
//!
//! Keeps every line's entering open-scheme id current by revalidating
//! after each buffer change, so a style query never rescans more than one
//! line. The scan itself is the pattern race from the data model: the
//! earliest-starting begin pattern wins (registration order breaks ties),
//! its end pattern closes it or the block swallows the rest of the line.
//!
//! Scheme ids are 1-based; 0 in a line attribute means "no open scheme".

use crate::buffer::Buffer;
use crate::chars::byte_to_char;

use super::scheme::{BlockScheme, CharSymbolSet, KeywordSet, SchemeError, Style, Token};

/// Incremental lexer over an ordered set of block schemes, keyword sets,
/// and char/symbol sets.
#[derive(Debug, Default)]
pub struct Highlighter {
    schemes: Vec<BlockScheme>,
    keywords: Vec<KeywordSet>,
    symbols: Vec<CharSymbolSet>,
    number_style: Option<Style>,
    /// Lowest-indexed line known to need retokenization.
    first_invalid: Option<usize>,
    /// Stop the revalidation walk once the open-scheme chain stabilizes
    /// past the damaged range. Off by default: the reference behavior
    /// walks to the end of the buffer every time.
    incremental: bool,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a block scheme; returns its 1-based id. A multiline
    /// scheme must have an end pattern or escaping enabled.
    pub fn add_scheme(&mut self, scheme: BlockScheme) -> Result<usize, SchemeError> {
        if scheme.multiline && scheme.end.is_none() && !scheme.escape_end {
            return Err(SchemeError::MultilineWithoutEnd {
                name: scheme.name.clone(),
            });
        }
        self.schemes.push(scheme);
        Ok(self.schemes.len())
    }

    /// Install a keyword set; returns its index.
    pub fn add_keywords(&mut self, set: KeywordSet) -> usize {
        self.keywords.push(set);
        self.keywords.len() - 1
    }

    /// Install a char/symbol set; returns its index.
    pub fn add_symbols(&mut self, set: CharSymbolSet) -> usize {
        self.symbols.push(set);
        self.symbols.len() - 1
    }

    /// Style for numeric literal runs.
    pub fn set_number_style(&mut self, style: Style) {
        self.number_style = Some(style);
    }

    /// Toggle the early-exit optimization of the revalidation walk.
    pub fn set_incremental(&mut self, on: bool) {
        self.incremental = on;
    }

    /// Style assigned to the token at `token`, if any.
    pub fn style_for(&self, token: Token) -> Option<Style> {
        match token {
            Token::Nothing => None,
            Token::Number => self.number_style,
            Token::Block(id) => self.schemes.get(id.checked_sub(1)?).map(|s| s.style),
            Token::Keyword(i) => self.keywords.get(i).map(|k| k.style),
            Token::Symbol(i) => self.symbols.get(i).map(|s| s.style),
        }
    }

    /// Token at `(row, col)` (char index), using the line's stored
    /// entering scheme. A query against a still-dirty line is an ordering
    /// bug in the caller; it is answered as if no scheme were open rather
    /// than failing.
    pub fn token_at(&self, buffer: &Buffer, row: usize, col: usize) -> Token {
        let Some(line) = buffer.line(row) else {
            return Token::Nothing;
        };
        let entering = if line.is_dirty() {
            tracing::warn!(row, "style query against a dirty line; assuming no open scheme");
            0
        } else {
            line.open_scheme()
        };
        self.scheme_at(entering, line.text(), col)
    }

    /// Style at `(row, col)`, or None for unstyled text.
    pub fn style_at(&self, buffer: &Buffer, row: usize, col: usize) -> Option<Style> {
        self.style_for(self.token_at(buffer, row, col))
    }

    /// Open-scheme id at the end of `row` (0 = none), computed from the
    /// line's stored entering scheme.
    pub fn end_of_line_scheme(&self, buffer: &Buffer, row: usize) -> usize {
        match self.token_at(buffer, row, usize::MAX) {
            Token::Block(id) => id,
            _ => 0,
        }
    }

    /// Buffer change notification: mark `[start, end)` dirty, lower the
    /// invalid watermark, and revalidate.
    pub fn lines_changed(&mut self, buffer: &mut Buffer, start: usize, end: usize) {
        let count = buffer.line_count();
        let start = start.min(count - 1);
        for i in start..end.min(count) {
            if let Some(line) = buffer.line_mut(i) {
                line.mark_dirty();
            }
        }
        self.first_invalid = Some(self.first_invalid.map_or(start, |f| f.min(start)));
        self.revalidate(buffer);
    }

    /// Recompute entering open-scheme ids from the nearest known-clean
    /// predecessor of the invalid watermark to the end of the buffer
    /// (or, with [`set_incremental`], until the chain stabilizes).
    ///
    /// [`set_incremental`]: Highlighter::set_incremental
    fn revalidate(&mut self, buffer: &mut Buffer) {
        let Some(first) = self.first_invalid.take() else {
            return;
        };
        let count = buffer.line_count();
        let mut row = first.min(count - 1);

        // Walk back to the nearest clean predecessor; its stored id
        // seeds the forward scan. Line 0 is seeded with no open scheme.
        while row > 0 && buffer.line(row).is_some_and(|l| l.is_dirty()) {
            row -= 1;
        }
        if let Some(line) = buffer.line_mut(row) {
            if line.is_dirty() {
                line.set_open_scheme(0);
            }
        }
        tracing::trace!(from = row, to = count, "revalidate");

        while row + 1 < count {
            let line = buffer.line(row).expect("dense line indices");
            let open = match self.scheme_at(line.open_scheme(), line.text(), usize::MAX) {
                Token::Block(id) => id,
                _ => 0,
            };
            let next = buffer.line_mut(row + 1).expect("dense line indices");
            if self.incremental && !next.is_dirty() && next.open_scheme() == open {
                tracing::trace!(row = row + 1, "open-scheme chain stable, stopping walk");
                return;
            }
            next.set_open_scheme(open);
            row += 1;
        }
    }

    /// The style query of the data model: the scheme or token type active
    /// at char index `pos` of `line`, given the scheme open when the line
    /// is entered (`entering`, 0 = none).
    ///
    /// With `pos` at or past the line length, the query only answers what
    /// block remains open after the line ends; that result seeds the next
    /// line's entering scheme.
    pub fn scheme_at(&self, entering: usize, line: &str, pos: usize) -> Token {
        let char_count = line.chars().count();
        let eol = pos >= char_count;
        let bpos = if eol {
            line.len()
        } else {
            crate::chars::char_to_byte(line, pos)
        };

        let mut i = 0; // byte scan position
        if entering != 0 {
            match self.schemes.get(entering - 1) {
                None => {
                    tracing::warn!(entering, "unknown entering scheme id; ignoring");
                }
                Some(sc) => match find_end(sc, line, 0) {
                    Some(e) if e <= bpos => i = e,
                    _ => {
                        if !eol || carries_at_eol(sc, line) {
                            return Token::Block(entering);
                        }
                        return Token::Nothing;
                    }
                },
            }
        }

        loop {
            // Earliest-starting begin pattern wins; ties go to the first
            // registered scheme.
            let mut best: Option<(usize, usize)> = None; // (byte start, scheme index)
            for (si, sc) in self.schemes.iter().enumerate() {
                if let Some(m) = sc.begin.find_at(line, i) {
                    if best.map_or(true, |(s, _)| m.start() < s) {
                        best = Some((m.start(), si));
                    }
                }
            }
            let Some((start, si)) = best.filter(|&(s, _)| s <= bpos) else {
                break;
            };
            let sc = &self.schemes[si];
            // The end search starts one character into the block, so a
            // one-character begin token cannot terminate itself.
            let after = start + line[start..].chars().next().map_or(1, char::len_utf8);
            match find_end(sc, line, after) {
                Some(e) if e <= bpos => i = e,
                _ => {
                    if !eol || carries_at_eol(sc, line) {
                        return Token::Block(si + 1);
                    }
                    return Token::Nothing;
                }
            }
        }

        if eol {
            return Token::Nothing;
        }

        // Not in any block: classify the character run containing pos.
        let chars: Vec<char> = line.chars().collect();
        let mut ci = byte_to_char(line, i);
        while ci <= pos {
            let c = chars[ci];
            if c.is_whitespace() {
                ci += 1;
                while ci < chars.len() && chars[ci].is_whitespace() {
                    ci += 1;
                }
                continue;
            }
            if c.is_alphabetic() || c == '_' {
                let start = ci;
                ci += 1;
                while ci < chars.len() && (chars[ci].is_alphanumeric() || chars[ci] == '_') {
                    ci += 1;
                }
                if ci > pos {
                    let word: String = chars[start..ci].iter().collect();
                    for (ki, set) in self.keywords.iter().enumerate() {
                        if set.contains(&word) {
                            return Token::Keyword(ki);
                        }
                    }
                    return Token::Nothing;
                }
                continue;
            }
            if c.is_ascii_digit() {
                ci += 1;
                while ci < chars.len() && chars[ci].is_ascii_digit() {
                    ci += 1;
                }
                if ci > pos {
                    return Token::Number;
                }
                continue;
            }
            if ci == pos {
                for (sy, set) in self.symbols.iter().enumerate() {
                    if set.contains(c) {
                        return Token::Symbol(sy);
                    }
                }
            }
            ci += 1;
        }
        Token::Nothing
    }
}

/// Byte offset just past the scheme's end match at or after `from`,
/// skipping escaped matches. None when the end is absent on this line
/// (including end-of-line blocks, which close with the line itself).
fn find_end(sc: &BlockScheme, line: &str, from: usize) -> Option<usize> {
    let end = match &sc.end {
        // Block runs to end of line; it has no in-line terminator.
        None => return Some(line.len()).filter(|_| !sc.escape_end || !odd_trailing_escapes(line, sc.escape_char)),
        Some(end) => end,
    };
    let mut from = from;
    while let Some(m) = end.find_at(line, from) {
        if sc.escape_end && odd_escapes_before(line, m.start(), sc.escape_char) {
            from = m.start() + line[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        return Some(m.end());
    }
    None
}

/// True when an odd run of `esc` immediately precedes byte offset `at`.
fn odd_escapes_before(line: &str, at: usize, esc: char) -> bool {
    line[..at].chars().rev().take_while(|&c| c == esc).count() % 2 == 1
}

/// True when the line ends in an odd run of `esc` (escaped newline).
fn odd_trailing_escapes(line: &str, esc: char) -> bool {
    odd_escapes_before(line, line.len(), esc)
}

/// Whether an unterminated block stays open past the end of the line.
fn carries_at_eol(sc: &BlockScheme, line: &str) -> bool {
    sc.multiline || (sc.escape_end && odd_trailing_escapes(line, sc.escape_char))
}
