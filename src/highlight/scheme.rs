//! Block schemes, keyword sets, symbol sets, and styles
//!
//! A block scheme is a begin/end pattern pair defining a lexical region
//! (comment, string) with a display style; keyword and symbol sets are
//! exact, case-sensitive membership tests. Pattern problems surface here,
//! at registration time, never during editing.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registration-time configuration error.
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("scheme `{name}`: invalid {which} pattern: {source}")]
    Pattern {
        name: String,
        which: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("scheme `{name}`: multiline requires an end pattern or escaping")]
    MultilineWithoutEnd { name: String },
}

/// sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Display style assigned to a styled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style {
    /// None renders in the default foreground.
    pub color: Option<Color>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Style {
    pub const fn fg(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Some(Color::rgb(r, g, b)),
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A begin/end pattern pair defining a lexical region. Immutable once
/// installed in a highlighter.
#[derive(Debug, Clone)]
pub struct BlockScheme {
    pub(crate) name: String,
    pub(crate) begin: Regex,
    /// None means the block runs to end of line.
    pub(crate) end: Option<Regex>,
    /// The end pattern is allowed to be missing on the begin line.
    pub(crate) multiline: bool,
    /// End matches preceded by an odd run of `escape_char` don't count.
    pub(crate) escape_end: bool,
    pub(crate) escape_char: char,
    pub(crate) style: Style,
}

impl BlockScheme {
    /// Compile a scheme, validating both patterns. Whether `multiline`
    /// is coherent depends on the escape setting too, so that check
    /// happens at registration, after any [`with_escape`](Self::with_escape).
    pub fn new(
        name: &str,
        begin: &str,
        end: Option<&str>,
        multiline: bool,
        style: Style,
    ) -> Result<Self, SchemeError> {
        let begin = Regex::new(begin).map_err(|source| SchemeError::Pattern {
            name: name.to_string(),
            which: "begin",
            source,
        })?;
        let end = end
            .map(|e| {
                Regex::new(e).map_err(|source| SchemeError::Pattern {
                    name: name.to_string(),
                    which: "end",
                    source,
                })
            })
            .transpose()?;
        Ok(Self {
            name: name.to_string(),
            begin,
            end,
            multiline,
            escape_end: false,
            escape_char: '\\',
            style,
        })
    }

    /// Enable escaping of the end pattern with `escape_char`. With no end
    /// pattern this lets a line-terminated block escape the newline and
    /// span lines.
    pub fn with_escape(mut self, escape_char: char) -> Self {
        self.escape_end = true;
        self.escape_char = escape_char;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// A named group of exact-match words sharing one style. Word boundaries
/// are the caller's concern; membership is case-sensitive.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pub(crate) name: String,
    pub(crate) style: Style,
    pub(crate) words: HashSet<String>,
}

impl KeywordSet {
    pub fn new(name: &str, style: Style, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            style,
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named group of single characters sharing one style.
#[derive(Debug, Clone)]
pub struct CharSymbolSet {
    pub(crate) name: String,
    pub(crate) style: Style,
    pub(crate) chars: HashSet<char>,
}

impl CharSymbolSet {
    pub fn new(name: &str, style: Style, chars: &str) -> Self {
        Self {
            name: name.to_string(),
            style,
            chars: chars.chars().collect(),
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What the highlighter found at a queried position.
///
/// Block ids are 1-based (0 would mean "no open scheme" in a line
/// attribute); keyword and symbol ids index their registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Unstyled: whitespace, unknown word, plain character.
    Nothing,
    /// Inside a numeric literal run.
    Number,
    /// Inside the block scheme with this (1-based) id.
    Block(usize),
    /// An exact member of the keyword set with this index.
    Keyword(usize),
    /// A member of the char/symbol set with this index.
    Symbol(usize),
}
