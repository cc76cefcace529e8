//! Arena view over a tree-sitter parse.
//!
//! tree-sitter nodes borrow the tree they come from, which makes them awkward to hold in
//! long-lived structures. We copy the shape of the tree once into a flat buffer of nodes
//! addressed by [`NodeId`], keeping parent links and ordered children so every structural
//! query is an index lookup. The arena is immutable once built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Half-open byte range `[start, end)` into the document text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl TextRange {
    #[must_use]
    /// Range from `start` to `end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    /// Zero-width range at `offset`, i.e. a bare cursor.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[must_use]
    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    /// True for a zero-width range.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[must_use]
    /// True when `other` lies within `self`, edges included.
    pub fn contains_range(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[must_use]
    /// True when `other` sits inside `self` and the two are not equal.
    pub fn strictly_contains(&self, other: Self) -> bool {
        self.contains_range(other) && *self != other
    }

    #[must_use]
    /// Same range as a `std::ops::Range`, for slicing.
    pub fn as_std(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Zero-based row and byte column, matching tree-sitter's `Point`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Zero-based line.
    pub row: usize,
    /// Byte offset within the line.
    pub column: usize,
}

impl Point {
    #[must_use]
    /// Point at `row` and `column`.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row, point.column)
    }
}

/// Index of a node inside a [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: &'static str,
    named: bool,
    range: TextRange,
    start: Point,
    end: Point,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Read-only arena copy of a parsed tree.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    /// tree-sitter node ids mapped to arena slots, used to translate query captures.
    ts_ids: HashMap<usize, NodeId>,
}

impl SyntaxTree {
    #[must_use]
    /// Copies every node of `tree` (named and anonymous) in pre-order.
    pub fn from_tree_sitter(tree: &tree_sitter::Tree) -> Self {
        let mut arena = Self {
            nodes: Vec::new(),
            ts_ids: HashMap::new(),
        };
        let mut cursor = tree.walk();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let id = arena.push(cursor.node(), stack.last().copied());
            if cursor.goto_first_child() {
                stack.push(id);
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return arena;
                }
                stack.pop();
            }
        }
    }

    fn push(&mut self, node: tree_sitter::Node<'_>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(NodeData {
            kind: node.kind(),
            named: node.is_named(),
            range: TextRange::new(node.start_byte(), node.end_byte()),
            start: node.start_position().into(),
            end: node.end_position().into(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.ts_ids.insert(node.id(), id);
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    #[must_use]
    /// Root node of the tree.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// True when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// Grammar kind of the node.
    pub fn kind(&self, id: NodeId) -> &'static str {
        self.data(id).kind
    }

    #[must_use]
    /// False for anonymous tokens such as punctuation.
    pub fn is_named(&self, id: NodeId) -> bool {
        self.data(id).named
    }

    #[must_use]
    /// Byte range of the node.
    pub fn range(&self, id: NodeId) -> TextRange {
        self.data(id).range
    }

    #[must_use]
    /// Position where the node starts.
    pub fn start_point(&self, id: NodeId) -> Point {
        self.data(id).start
    }

    #[must_use]
    /// Position where the node ends.
    pub fn end_point(&self, id: NodeId) -> Point {
        self.data(id).end
    }

    #[must_use]
    /// Parent node, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    #[must_use]
    /// Children in source order, anonymous tokens included.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    #[must_use]
    /// First child, named or not.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    #[must_use]
    /// Last child, named or not.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Named children in source order.
    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_named(*child))
    }

    /// Strict ancestors of `id`, innermost first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |node| self.parent(*node))
    }

    #[must_use]
    /// Returns true when `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|node| node == ancestor)
    }

    #[must_use]
    pub(crate) fn from_ts_id(&self, ts_id: usize) -> Option<NodeId> {
        self.ts_ids.get(&ts_id).copied()
    }

    #[must_use]
    /// Deepest node (named or anonymous) whose range contains `offset`.
    ///
    /// A child contains the offset when `start <= offset < end`. When no child does, the
    /// current node is the answer, so offsets in inter-token whitespace land on the
    /// enclosing node.
    pub fn descendant_at(&self, offset: usize) -> NodeId {
        self.smallest_covering(TextRange::empty(offset))
    }

    #[must_use]
    /// Deepest node whose range contains `range`. Empty ranges follow the same rule as
    /// [`Self::descendant_at`].
    pub fn smallest_covering(&self, range: TextRange) -> NodeId {
        let covers = |candidate: TextRange| {
            if range.is_empty() {
                candidate.start <= range.start && range.start < candidate.end
            } else {
                candidate.contains_range(range)
            }
        };

        let mut node = self.root();
        while let Some(child) = self
            .children(node)
            .iter()
            .copied()
            .find(|child| covers(self.range(*child)))
        {
            node = child;
        }
        node
    }
}

/// Byte offset to row/column mapping over a document's text.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    #[must_use]
    /// Index the line starts of `text`.
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            line_starts,
            len: text.len(),
        }
    }

    #[must_use]
    /// Position of `offset`, clamped to the end of the text.
    pub fn point(&self, offset: usize) -> Point {
        let offset = offset.min(self.len);
        let row = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        Point::new(row, offset - self.line_starts[row])
    }

    #[must_use]
    /// Offset of `point`, or `None` when the row does not exist or the column runs past the
    /// end of its line.
    pub fn offset(&self, point: Point) -> Option<usize> {
        let line_start = *self.line_starts.get(point.row)?;
        let line_end = self
            .line_starts
            .get(point.row + 1)
            .map_or(self.len, |next| next - 1);
        let offset = line_start + point.column;
        (offset <= line_end).then_some(offset)
    }
}

#[cfg(test)]
#[path = "tests/syntax.rs"]
mod tests;
