//! Quill - line-oriented editing core
//!
//! This crate provides the model side of a code editor: a line buffer
//! with per-line highlight state, an incremental block-scheme lexer,
//! dual-mode (linear and rectangular) selections with tab-aware column
//! math, and a coalescing patch-based undo history. [`Editor`] ties the
//! pieces into one session a host UI can drive.

pub mod buffer;
pub mod caret;
pub mod chars;
pub mod column;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod selection;
pub mod trace;
pub mod undo;

// Re-export commonly used types
pub use buffer::{Buffer, Line};
pub use caret::Caret;
pub use config::EditorConfig;
pub use editor::Editor;
pub use highlight::{BlockScheme, Highlighter, SchemeError, Style, Token};
pub use selection::{CursorState, SelectionMode};
pub use undo::{OpTag, UndoPatch, UndoStack};
