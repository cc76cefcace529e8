//! Delimiter pairs: brackets, quotes and tags around a syntax node.
//!
//! Pair detection is table driven. A node kind either has its first and last child as
//! delimiters (`Delimited`), or is a tag-like construct whose first and last children must
//! be specific opening and closing node kinds (`Tagged`). The table is closed; new kinds
//! are added as entries, usually through configuration.

use crate::block::FileTree;
use crate::syntax::{NodeId, TextRange};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Strategy for extracting the delimiters of a pair node.
pub enum PairKind {
    /// First and last child are the delimiters.
    Delimited,
    /// First child must be of kind `open` and last child of kind `close`.
    Tagged {
        /// Kind of the opening child, e.g. `start_tag`.
        open: &'static str,
        /// Kind of the closing child, e.g. `end_tag`.
        close: &'static str,
    },
}

/// Node kinds whose first and last children delimit their content, across common grammars.
const DELIMITED_KINDS: &[&str] = &[
    // expressions and literals
    "parenthesized_expression",
    "object",
    "array",
    "string",
    "template_string",
    "tuple_expression",
    "array_expression",
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "object_pattern",
    "array_pattern",
    // imports and calls
    "named_imports",
    "export_clause",
    "use_list",
    "import_list",
    "arguments",
    "argument_list",
    "formal_parameters",
    "parameters",
    "type_arguments",
    "type_parameters",
    // bodies
    "statement_block",
    "block",
    "class_body",
    "switch_body",
    "declaration_list",
    "field_declaration_list",
    "enum_variant_list",
    "token_tree",
    "jsx_expression",
    "quoted_attribute_value",
];

/// Tag-like pairs: (node kind, opening child kind, closing child kind).
const TAGGED_KINDS: &[(&str, &str, &str)] = &[
    ("element", "start_tag", "end_tag"),
    ("script_element", "start_tag", "end_tag"),
    ("style_element", "start_tag", "end_tag"),
    ("jsx_element", "jsx_opening_element", "jsx_closing_element"),
];

/// Closed classification of pair node kinds.
#[derive(Clone, Debug)]
pub struct PairTable {
    entries: HashMap<String, PairKind>,
}

impl Default for PairTable {
    fn default() -> Self {
        let mut table = Self {
            entries: HashMap::new(),
        };
        for kind in DELIMITED_KINDS {
            table = table.with_delimited(kind);
        }
        for &(kind, open, close) in TAGGED_KINDS {
            table = table.with_tagged(kind, open, close);
        }
        table
    }
}

impl PairTable {
    #[must_use]
    /// Built-in table extended with `extra_delimited` kinds (e.g. from configuration).
    pub fn with_extra<S: AsRef<str>>(extra_delimited: &[S]) -> Self {
        extra_delimited
            .iter()
            .fold(Self::default(), |table, kind| table.with_delimited(kind.as_ref()))
    }

    #[must_use]
    /// Add `kind` as a delimited pair.
    pub fn with_delimited(mut self, kind: &str) -> Self {
        self.entries.insert(kind.to_string(), PairKind::Delimited);
        self
    }

    #[must_use]
    /// Add `kind` as a tag pair with the given opening and closing child kinds.
    pub fn with_tagged(mut self, kind: &str, open: &'static str, close: &'static str) -> Self {
        self.entries
            .insert(kind.to_string(), PairKind::Tagged { open, close });
        self
    }

    #[must_use]
    /// Strategy for `kind`, if it is a pair.
    pub fn get(&self, kind: &str) -> Option<PairKind> {
        self.entries.get(kind).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One delimiter token of a pair.
pub struct Delimiter {
    /// Source text of the delimiter.
    pub text: String,
    /// Byte range of the delimiter.
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Detected pair. Transient: recomputed from the tree whenever it is needed.
pub struct Pair {
    /// Opening delimiter.
    pub open: Delimiter,
    /// Closing delimiter.
    pub close: Delimiter,
    /// Range between the end of `open` and the start of `close`.
    pub content: TextRange,
    /// Node the delimiters belong to.
    pub node: NodeId,
}

impl Pair {
    #[must_use]
    /// Full range, delimiters included.
    pub fn span(&self) -> TextRange {
        TextRange::new(self.open.range.start, self.close.range.end)
    }
}

/// Build the pair for `node` if its kind is in the table and its children fit the strategy.
fn pair_at(tree: &FileTree, table: &PairTable, node: NodeId) -> Option<Pair> {
    let syntax = tree.syntax();
    let kind = table.get(syntax.kind(node))?;
    let open = syntax.first_child(node)?;
    let close = syntax.last_child(node)?;
    if open == close {
        return None;
    }
    if let PairKind::Tagged {
        open: open_kind,
        close: close_kind,
    } = kind
    {
        if syntax.kind(open) != open_kind || syntax.kind(close) != close_kind {
            return None;
        }
    }

    let delimiter = |id: NodeId| Delimiter {
        text: tree.text(syntax.range(id)).to_string(),
        range: syntax.range(id),
    };
    let open = delimiter(open);
    let close = delimiter(close);
    Some(Pair {
        content: TextRange::new(open.range.end, close.range.start),
        open,
        close,
        node,
    })
}

#[must_use]
/// Innermost pair among `node` and its ancestors.
pub fn find_containing_pair(tree: &FileTree, table: &PairTable, node: NodeId) -> Option<Pair> {
    let syntax = tree.syntax();
    std::iter::once(node)
        .chain(syntax.ancestors(node))
        .find_map(|candidate| pair_at(tree, table, candidate))
}

/// Next pair outside `pair`, if any.
fn outer_pair(tree: &FileTree, table: &PairTable, pair: &Pair) -> Option<Pair> {
    let parent = tree.syntax().parent(pair.node)?;
    find_containing_pair(tree, table, parent)
}

/// Toggle one range between the inside and the outside of its pair.
fn select_inside_one(tree: &FileTree, table: &PairTable, range: TextRange) -> TextRange {
    let node = tree.syntax().descendant_at(range.start);
    let Some(mut pair) = find_containing_pair(tree, table, node) else {
        return range;
    };

    // A previous toggle may already have grown the range past this pair.
    while range.strictly_contains(pair.span()) {
        match outer_pair(tree, table, &pair) {
            Some(outer) => pair = outer,
            None => return range,
        }
    }

    tracing::trace!(range = %range, pair = %pair.span(), "Toggling inside pair");

    if range == pair.content {
        pair.span()
    } else if range == pair.span() {
        match outer_pair(tree, table, &pair) {
            Some(outer) if range == outer.content => outer.span(),
            Some(outer) => outer.content,
            None => pair.span(),
        }
    } else {
        pair.content
    }
}

#[must_use]
/// For every range, select the inside of its pair, or the whole pair when the inside is
/// already selected, one nesting level per call. Overlapping results are merged.
pub fn select_inside(tree: &FileTree, table: &PairTable, ranges: &[TextRange]) -> Vec<TextRange> {
    merge_ranges(
        ranges
            .iter()
            .map(|range| select_inside_one(tree, table, *range))
            .collect(),
    )
}

#[must_use]
/// Opening and closing delimiter ranges of each range's pair, as separate cursors.
/// Sorted, with exact duplicates removed.
pub fn select_surrounding_pair(
    tree: &FileTree,
    table: &PairTable,
    ranges: &[TextRange],
) -> Vec<TextRange> {
    let mut delimiters: Vec<TextRange> = ranges
        .iter()
        .filter_map(|range| {
            let node = tree.syntax().descendant_at(range.start);
            find_containing_pair(tree, table, node)
        })
        .flat_map(|pair| [pair.open.range, pair.close.range])
        .collect();
    delimiters.sort();
    delimiters.dedup();
    delimiters
}

#[must_use]
/// Sort by start then end and union ranges that overlap or touch.
pub fn merge_ranges(mut ranges: Vec<TextRange>) -> Vec<TextRange> {
    ranges.sort();
    let mut merged: Vec<TextRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
#[path = "tests/pair.rs"]
mod tests;
