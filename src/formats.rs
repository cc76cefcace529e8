//! Language formats: the parser provider and the per-language block rules.
//!
//! A `Format` bundles everything language specific the core needs: the tree-sitter grammar,
//! which node kinds count as trivia, an optional query naming block-worthy nodes and an
//! optional node kind designating the top-level container.

pub mod html;
pub mod javascript;
pub mod markdown;

use crate::error::{Error, Result};

/// Language-specific rules for building blocks.
pub trait Format {
    /// Identifier used for lookup and in diagnostics.
    fn name(&self) -> &'static str;

    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;

    /// File suffixes (without the dot) that select this format.
    fn file_extensions(&self) -> &[&'static str];

    /// Query whose captures mark nodes as block-worthy. Empty means every block candidate is.
    fn block_query(&self) -> &str {
        ""
    }

    /// Node kinds that are never blocks and may sit between blocks as separators.
    fn trivia_kinds(&self) -> &[&'static str] {
        &["comment"]
    }

    /// Node kind whose outermost instance holds the top-level blocks, if not the root.
    fn top_level_kind(&self) -> Option<&'static str> {
        None
    }
}

/// Every format compiled into the crate.
#[must_use]
pub fn builtin() -> Vec<Box<dyn Format>> {
    vec![
        Box::new(javascript::JavaScriptFormat),
        Box::new(html::HtmlFormat),
        Box::new(markdown::MarkdownFormat),
    ]
}

/// Find a format by name or file extension, case-insensitively.
///
/// # Errors
///
/// Returns [`Error::LanguageNotFound`] when no built-in format matches.
pub fn lookup(name_or_extension: &str) -> Result<Box<dyn Format>> {
    let wanted = name_or_extension.trim_start_matches('.').to_ascii_lowercase();
    builtin()
        .into_iter()
        .find(|format| {
            format.name() == wanted || format.file_extensions().iter().any(|ext| *ext == wanted)
        })
        .ok_or_else(|| Error::LanguageNotFound(name_or_extension.to_string()))
}
