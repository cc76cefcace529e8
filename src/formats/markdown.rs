//! Markdown format implementation using tree-sitter-md.
//!
//! Only the block grammar is used. Inline content is a single `inline` node per paragraph or
//! heading, so the block query lifts cursor selections out of it to the enclosing block.

use crate::formats::Format;

/// Block-level markdown structure: sections, headings, paragraphs, lists and fences.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["md", "markdown"]
    }

    fn block_query(&self) -> &'static str {
        "[(section) (atx_heading) (paragraph) (list) (list_item) (fenced_code_block) (block_quote)] @block"
    }

    fn trivia_kinds(&self) -> &[&'static str] {
        &[]
    }
}
