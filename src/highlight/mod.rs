//! Incremental lexical highlighting
//!
//! Assigns a style to every character of the buffer without re-scanning
//! the whole document per keystroke. Per-line attributes carry the open
//! block scheme across line boundaries; the [`Highlighter`] revalidates
//! them incrementally as the buffer reports changes.

mod highlighter;
mod profiles;
mod scheme;

pub use highlighter::Highlighter;
pub use profiles::c_like;
pub use scheme::{BlockScheme, CharSymbolSet, Color, KeywordSet, SchemeError, Style, Token};
