//! Block representation for tree-sitter parsed documents.
//!
//! A block is a selectable syntactic unit: one named, non-trivia child of some node. The
//! top-level blocks are the children of the container node (the root unless the format
//! designates another kind). A `FileTree` is one immutable snapshot of a document: the
//! text, its arena tree and the block rules that apply to it. Any edit to the document
//! requires a fresh `FileTree`.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::syntax::{LineIndex, NodeId, Point, SyntaxTree, TextRange};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

static NEXT_SNAPSHOT: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a `FileTree`, used to reject selections from other snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SnapshotId(u64);

impl SnapshotId {
    fn next() -> Self {
        Self(NEXT_SNAPSHOT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Selectable unit wrapping one syntax node.
pub struct Block {
    /// Node this block stands for.
    pub node: NodeId,
    /// Grammar kind of the node.
    pub kind: &'static str,
    /// Byte range of the node, trivia excluded.
    pub range: TextRange,
}

/// One parsed snapshot of a document together with its top-level blocks.
#[derive(Debug)]
pub struct FileTree {
    snapshot: SnapshotId,
    language: String,
    source: String,
    syntax: SyntaxTree,
    lines: LineIndex,
    trivia_kinds: HashSet<String>,
    /// Nodes captured by the format's block query; `None` when every candidate qualifies.
    block_worthy: Option<HashSet<NodeId>>,
    container: NodeId,
    blocks: Vec<Block>,
}

impl FileTree {
    /// Parse `source` with the format's grammar and derive the block structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParserLoadFailed`] when the grammar cannot be loaded or the parse
    /// yields no tree, and [`Error::InvalidQuery`] when the format's block query is invalid.
    pub fn parse(source: impl Into<String>, format: &dyn Format, config: &Config) -> Result<Self> {
        let source = source.into();
        let language = format.language();

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::ParserLoadFailed {
                language: format.name().to_string(),
                reason: e.to_string(),
            })?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| Error::ParserLoadFailed {
                language: format.name().to_string(),
                reason: "parser returned no tree".to_string(),
            })?;

        let syntax = SyntaxTree::from_tree_sitter(&tree);

        let block_worthy = if format.block_query().trim().is_empty() {
            None
        } else {
            let query =
                Query::new(&language, format.block_query()).map_err(|e| Error::InvalidQuery {
                    language: format.name().to_string(),
                    reason: e.to_string(),
                })?;
            let mut worthy = HashSet::new();
            let mut cursor = QueryCursor::new();
            let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
            while let Some(m) = matches.next() {
                for capture in m.captures {
                    if let Some(id) = syntax.from_ts_id(capture.node.id()) {
                        worthy.insert(id);
                    }
                }
            }
            Some(worthy)
        };

        let trivia_kinds = format
            .trivia_kinds()
            .iter()
            .map(ToString::to_string)
            .chain(config.extra_trivia_kinds.iter().cloned())
            .collect();

        let mut file_tree = Self {
            snapshot: SnapshotId::next(),
            language: format.name().to_string(),
            lines: LineIndex::new(&source),
            source,
            container: syntax.root(),
            syntax,
            trivia_kinds,
            block_worthy,
            blocks: Vec::new(),
        };
        file_tree.container = file_tree.find_container(format.top_level_kind());
        file_tree.blocks = file_tree.build_blocks();

        tracing::debug!(
            language = %file_tree.language,
            snapshot = ?file_tree.snapshot,
            nodes = file_tree.syntax.len(),
            blocks = file_tree.blocks.len(),
            "Built file tree"
        );
        Ok(file_tree)
    }

    fn find_container(&self, top_level_kind: Option<&str>) -> NodeId {
        let Some(kind) = top_level_kind else {
            return self.syntax.root();
        };
        let mut stack = vec![self.syntax.root()];
        while let Some(node) = stack.pop() {
            if self.syntax.kind(node) == kind {
                return node;
            }
            stack.extend(self.syntax.children(node).iter().rev().copied());
        }
        self.syntax.root()
    }

    /// Top-level blocks: the block children of the container, in source order.
    fn build_blocks(&self) -> Vec<Block> {
        self.blocks_of(self.container)
    }

    #[must_use]
    /// Identity of this snapshot.
    pub fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    #[must_use]
    /// Name of the format the text was parsed with.
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    /// The parsed text.
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    /// Arena copy of the parse tree.
    pub fn syntax(&self) -> &SyntaxTree {
        &self.syntax
    }

    #[must_use]
    /// Node whose children are the top-level blocks.
    pub fn container(&self) -> NodeId {
        self.container
    }

    #[must_use]
    /// Top-level blocks in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    /// Text covered by `range`, empty when the range is out of bounds.
    pub fn text(&self, range: TextRange) -> &str {
        self.source.get(range.as_std()).unwrap_or_default()
    }

    #[must_use]
    /// True for comment-like nodes, which are never blocks.
    pub fn is_trivia(&self, node: NodeId) -> bool {
        self.trivia_kinds.contains(self.syntax.kind(node))
    }

    #[must_use]
    /// Named and not trivia: the node can appear in a sibling block sequence.
    pub fn is_block_candidate(&self, node: NodeId) -> bool {
        self.syntax.is_named(node) && !self.is_trivia(node)
    }

    #[must_use]
    /// Candidate that the format's block query (if any) also marks as block-worthy.
    pub fn is_block_worthy(&self, node: NodeId) -> bool {
        self.is_block_candidate(node)
            && self
                .block_worthy
                .as_ref()
                .is_none_or(|worthy| worthy.contains(&node))
    }

    #[must_use]
    /// True for nodes at or below the container, the only nodes blocks are drawn from.
    pub fn is_within_container(&self, node: NodeId) -> bool {
        self.syntax.is_ancestor_or_self(self.container, node)
    }

    #[must_use]
    /// Sibling block sequence made of the children of `parent`.
    pub fn blocks_of(&self, parent: NodeId) -> Vec<Block> {
        self.syntax
            .children(parent)
            .iter()
            .copied()
            .filter(|child| self.is_block_candidate(*child))
            .map(|node| self.block(node))
            .collect()
    }

    #[must_use]
    /// Block view of `node`.
    pub fn block(&self, node: NodeId) -> Block {
        Block {
            node,
            kind: self.syntax.kind(node),
            range: self.syntax.range(node),
        }
    }

    #[must_use]
    /// Row and column of `offset`.
    pub fn point_at(&self, offset: usize) -> Point {
        self.lines.point(offset)
    }

    #[must_use]
    /// Byte offset of `point`, if it lies inside the text.
    pub fn offset_at(&self, point: Point) -> Option<usize> {
        self.lines.offset(point)
    }
}

#[cfg(test)]
#[path = "tests/block.rs"]
mod tests;
