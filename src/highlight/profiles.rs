//! Built-in highlighting profiles
//!
//! Demonstrates scheme registration with a C-like profile: block and line
//! comments, strings with backslash escapes, a small keyword vocabulary,
//! operator symbols, and a numeric style. Host applications typically
//! build their own profile for their language instead.

use super::highlighter::Highlighter;
use super::scheme::{BlockScheme, CharSymbolSet, KeywordSet, SchemeError, Style};

/// A highlighter configured for a generic C-like language.
pub fn c_like() -> Result<Highlighter, SchemeError> {
    let mut hl = Highlighter::new();

    // Doc comments before plain block comments so `/**` wins the race at
    // the same start position.
    hl.add_scheme(BlockScheme::new(
        "doc-comment",
        r"/\*\*",
        Some(r"\*/"),
        true,
        Style::fg(0x3a, 0x80, 0x3a).italic(),
    )?)?;
    hl.add_scheme(BlockScheme::new(
        "block-comment",
        r"/\*",
        Some(r"\*/"),
        true,
        Style::fg(0x50, 0x80, 0x50),
    )?)?;
    hl.add_scheme(BlockScheme::new(
        "line-comment",
        r"//",
        None,
        false,
        Style::fg(0x50, 0x80, 0x50),
    )?)?;
    hl.add_scheme(
        BlockScheme::new("string", "\"", Some("\""), false, Style::fg(0xa3, 0x37, 0x2f))?
            .with_escape('\\'),
    )?;
    hl.add_scheme(
        BlockScheme::new("char", "'", Some("'"), false, Style::fg(0xa3, 0x37, 0x2f))?
            .with_escape('\\'),
    )?;

    hl.add_keywords(KeywordSet::new(
        "control",
        Style::fg(0x20, 0x40, 0xa0).bold(),
        &[
            "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
            "return", "goto",
        ],
    ));
    hl.add_keywords(KeywordSet::new(
        "types",
        Style::fg(0x20, 0x70, 0x70),
        &[
            "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
            "bool", "struct", "enum", "union", "const", "static",
        ],
    ));
    hl.add_keywords(KeywordSet::new(
        "constants",
        Style::fg(0x80, 0x30, 0x80),
        &["true", "false", "NULL"],
    ));

    hl.add_symbols(CharSymbolSet::new(
        "operators",
        Style::fg(0x60, 0x60, 0x60),
        "+-*/%=<>!&|^~?:;,.(){}[]",
    ));

    hl.set_number_style(Style::fg(0xa0, 0x60, 0x10));
    Ok(hl)
}
