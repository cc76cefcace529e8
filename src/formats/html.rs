//! HTML via tree-sitter-html. Elements are tag pairs; comments are trivia.

use crate::formats::Format;

/// HTML documents.
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &'static str {
        "html"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_html::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["html", "htm"]
    }
}
