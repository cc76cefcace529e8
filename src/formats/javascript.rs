//! JavaScript (and JSX) via tree-sitter-javascript.

use crate::formats::Format;

/// JavaScript and JSX sources.
pub struct JavaScriptFormat;

impl Format for JavaScriptFormat {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["js", "mjs", "cjs", "jsx"]
    }
}
