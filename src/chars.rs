//! Character classification and index helpers for word selection

/// Character kind for word selection and word-wise deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    /// Punctuation and everything else
    Symbol,
    /// Alphanumerics and underscore
    Word,
    /// Whitespace; also the kind reported outside line bounds
    White,
}

/// Get the kind of a character.
pub fn char_kind(ch: char) -> CharKind {
    if ch == '_' || ch.is_alphanumeric() {
        CharKind::Word
    } else if ch.is_whitespace() {
        CharKind::White
    } else {
        CharKind::Symbol
    }
}

/// Kind of the character at `index`, or `White` when out of bounds.
pub fn kind_at(text: &str, index: usize) -> CharKind {
    text.chars().nth(index).map_or(CharKind::White, char_kind)
}

/// `[start, end)` char range of the same-kind run containing `index`.
///
/// `index` at or past the end of the line yields the empty range at the
/// line end.
pub fn word_bounds(text: &str, index: usize) -> (usize, usize) {
    let chars: Vec<char> = text.chars().collect();
    if index >= chars.len() {
        return (chars.len(), chars.len());
    }
    let kind = char_kind(chars[index]);
    let mut start = index;
    while start > 0 && char_kind(chars[start - 1]) == kind {
        start -= 1;
    }
    let mut end = index + 1;
    while end < chars.len() && char_kind(chars[end]) == kind {
        end += 1;
    }
    (start, end)
}

/// Convert a char index to a byte offset (clamped to the text length).
pub fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Convert a byte offset to a char index (clamped).
pub fn byte_to_char(text: &str, byte_offset: usize) -> usize {
    text.char_indices()
        .take_while(|(i, _)| *i < byte_offset)
        .count()
}
