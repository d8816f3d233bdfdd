//! Editor configuration
//!
//! Host applications usually embed this, but it can also be loaded from
//! YAML. Parse failures are not fatal: the loader logs a warning and
//! falls back to defaults, so a bad config file never takes down an
//! interactive session.

use serde::{Deserialize, Serialize};

/// Tunables of the editing core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Width of a tab stop in visual columns.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Maximum number of undo steps kept.
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
    /// Let the highlighter stop its revalidation walk once the
    /// open-scheme chain stabilizes, instead of walking to end of buffer.
    #[serde(default)]
    pub incremental_highlight: bool,
}

fn default_tab_width() -> usize {
    4
}

fn default_undo_depth() -> usize {
    1000
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            undo_depth: default_undo_depth(),
            incremental_highlight: false,
        }
    }
}

impl EditorConfig {
    /// Parse a YAML config, falling back to defaults on error.
    pub fn from_yaml(content: &str) -> Self {
        match serde_yaml::from_str(content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse editor config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
