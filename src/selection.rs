//! Selections: contiguous runs of sibling blocks, and the navigation between them.
//!
//! A selection never owns anything. It names its snapshot, the node whose children form the
//! sibling sequence, and an inclusive index run into that sequence. The sequence is
//! recomputed from the `FileTree` on demand, so a selection is only meaningful together
//! with the tree it came from; using it with another snapshot yields nothing.

use crate::block::{Block, FileTree, SnapshotId};
use crate::syntax::{NodeId, Point, TextRange};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Inclusive run `start..=end` of sibling blocks.
pub struct Selection {
    snapshot: SnapshotId,
    /// Node whose children form the sibling sequence; `None` is the document level, whose
    /// single block is the container itself.
    parent: Option<NodeId>,
    start: usize,
    end: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Whether growing past the top-level blocks may select the whole document.
pub enum ParentMode {
    /// The document pseudo-block is never a parent-growth target.
    #[default]
    ExcludeRoot,
    /// Growing from the top level selects the document pseudo-block.
    IncludeRoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Side on which [`Selection::extend`] widens a run.
pub enum Extend {
    /// Take in the sibling before the run.
    Previous,
    /// Take in the sibling after the run.
    Next,
}

impl FileTree {
    /// Map a caller range back onto the block structure.
    ///
    /// Succeeds only when `range.start` is the start of a block and `range.end` is the end of
    /// a block in the same sibling sequence, with the first not after the second. When
    /// nested levels share an identical range, the outermost level is chosen.
    #[must_use]
    pub fn resolve(&self, range: TextRange) -> Option<Selection> {
        if range.is_empty() {
            return None;
        }
        let syntax = self.syntax();
        let covering = syntax.smallest_covering(range);
        if !self.is_within_container(covering) {
            return None;
        }

        let mut found = self.match_run(covering, range);
        let mut node = covering;
        while node != self.container() && syntax.range(node) == range {
            let Some(parent) = syntax.parent(node) else {
                break;
            };
            if let Some(selection) = self.match_run(parent, range) {
                found = Some(selection);
            }
            node = parent;
        }
        found
    }

    fn match_run(&self, parent: NodeId, range: TextRange) -> Option<Selection> {
        let siblings = self.blocks_of(parent);
        let start = siblings.iter().position(|b| b.range.start == range.start)?;
        let end = siblings.iter().rposition(|b| b.range.end == range.end)?;
        (start <= end).then(|| self.selection(Some(parent), start, end))
    }

    /// Innermost block under `offset`.
    ///
    /// Starts from the deepest node containing the offset, lifts to the nearest block-worthy
    /// node, then keeps lifting while the ancestor starts at the same offset, so a statement
    /// wins over the expression it begins with. Finer nodes are reached through
    /// [`Selection::child`].
    #[must_use]
    pub fn select_smallest(&self, offset: usize) -> Option<Selection> {
        let syntax = self.syntax();
        let container = self.container();
        let innermost = syntax.descendant_at(offset);
        if !self.is_within_container(innermost) {
            return None;
        }

        let mut node = std::iter::once(innermost)
            .chain(syntax.ancestors(innermost))
            .take_while(|node| *node != container)
            .find(|node| self.is_block_worthy(*node))?;

        let start = syntax.range(node).start;
        for ancestor in syntax.ancestors(node) {
            if ancestor == container || syntax.range(ancestor).start != start {
                break;
            }
            if self.is_block_worthy(ancestor) {
                node = ancestor;
            }
        }

        self.single(node)
    }

    /// Selection holding just `node` among its siblings.
    fn single(&self, node: NodeId) -> Option<Selection> {
        let parent = self.syntax().parent(node)?;
        let index = self.blocks_of(parent).iter().position(|b| b.node == node)?;
        Some(self.selection(Some(parent), index, index))
    }

    fn selection(&self, parent: Option<NodeId>, start: usize, end: usize) -> Selection {
        Selection {
            snapshot: self.snapshot(),
            parent,
            start,
            end,
        }
    }

    /// Selection over every top-level block, or `None` for an empty document.
    #[must_use]
    pub fn select_all(&self) -> Option<Selection> {
        let last = self.blocks().len().checked_sub(1)?;
        Some(self.selection(Some(self.container()), 0, last))
    }

    /// Document-level selection whose single block is the container.
    #[must_use]
    pub fn select_document(&self) -> Selection {
        self.selection(None, 0, 0)
    }
}

impl Selection {
    #[must_use]
    /// Snapshot the selection was made on.
    pub fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }

    #[must_use]
    /// Node whose children the run indexes, `None` at document level.
    pub fn parent_node(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    /// Index of the first block of the run.
    pub fn start_index(&self) -> usize {
        self.start
    }

    #[must_use]
    /// Index of the last block of the run, inclusive.
    pub fn end_index(&self) -> usize {
        self.end
    }

    #[must_use]
    /// True for the document-level selection.
    pub fn is_document(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    /// Number of blocks in the run.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    fn with_run(self, start: usize, end: usize) -> Self {
        Self { start, end, ..self }
    }

    fn is_current(&self, tree: &FileTree) -> bool {
        let current = self.snapshot == tree.snapshot();
        if !current {
            tracing::warn!(
                selection = ?self.snapshot,
                tree = ?tree.snapshot(),
                "Selection used with a different snapshot"
            );
        }
        current
    }

    #[must_use]
    /// Full sibling sequence this selection indexes into.
    pub fn siblings(&self, tree: &FileTree) -> Vec<Block> {
        match self.parent {
            Some(parent) => tree.blocks_of(parent),
            None => vec![tree.block(tree.container())],
        }
    }

    #[must_use]
    /// Blocks in the run, or nothing when the selection is stale.
    pub fn blocks(&self, tree: &FileTree) -> Vec<Block> {
        if !self.is_current(tree) {
            return Vec::new();
        }
        self.siblings(tree)
            .get(self.start..=self.end)
            .map(<[Block]>::to_vec)
            .unwrap_or_default()
    }

    #[must_use]
    /// Byte range from the start of the first block to the end of the last.
    pub fn range(&self, tree: &FileTree) -> Option<TextRange> {
        let blocks = self.blocks(tree);
        let first = blocks.first()?;
        let last = blocks.last()?;
        Some(TextRange::new(first.range.start, last.range.end))
    }

    #[must_use]
    /// Row/column form of [`Self::range`].
    pub fn points(&self, tree: &FileTree) -> Option<(Point, Point)> {
        let blocks = self.blocks(tree);
        let first = blocks.first()?;
        let last = blocks.last()?;
        Some((
            tree.syntax().start_point(first.node),
            tree.syntax().end_point(last.node),
        ))
    }

    #[must_use]
    /// Grow to the node the run hangs off, as a single block among its own siblings.
    ///
    /// At the top level the answer depends on `mode`: the document pseudo-block under
    /// [`ParentMode::IncludeRoot`], nothing under [`ParentMode::ExcludeRoot`].
    pub fn parent(&self, tree: &FileTree, mode: ParentMode) -> Option<Self> {
        if !self.is_current(tree) {
            return None;
        }
        let mut node = self.parent?;
        loop {
            if node == tree.container() {
                return match mode {
                    ParentMode::IncludeRoot => Some(tree.select_document()),
                    ParentMode::ExcludeRoot => None,
                };
            }
            if let Some(selection) = tree.single(node) {
                return Some(selection);
            }
            node = tree.syntax().parent(node)?;
        }
    }

    #[must_use]
    /// Adjacent run of the same width before this one, clamped at the first block.
    pub fn previous(&self, tree: &FileTree) -> Option<Self> {
        if !self.is_current(tree) || self.start == 0 {
            return None;
        }
        let end = self.start - 1;
        let start = self.start.saturating_sub(self.width());
        Some(self.with_run(start, end))
    }

    #[must_use]
    /// Adjacent run of the same width after this one, clamped at the last block.
    pub fn next(&self, tree: &FileTree) -> Option<Self> {
        if !self.is_current(tree) {
            return None;
        }
        let last = self.siblings(tree).len().checked_sub(1)?;
        if self.end >= last {
            return None;
        }
        let start = self.end + 1;
        let end = (self.end + self.width()).min(last);
        Some(self.with_run(start, end))
    }

    #[must_use]
    /// Widen the run by one sibling in `direction`; unchanged at the boundary.
    pub fn extend(&self, tree: &FileTree, direction: Extend) -> Self {
        if !self.is_current(tree) {
            return *self;
        }
        match direction {
            Extend::Previous if self.start > 0 => self.with_run(self.start - 1, self.end),
            Extend::Next if self.end + 1 < self.siblings(tree).len() => {
                self.with_run(self.start, self.end + 1)
            }
            _ => *self,
        }
    }

    #[must_use]
    /// Descend one level: every child block of a single-block run.
    pub fn child(&self, tree: &FileTree) -> Option<Self> {
        if self.start != self.end {
            return None;
        }
        let block = *self.blocks(tree).first()?;
        let children = tree.blocks_of(block.node);
        let last = children.len().checked_sub(1)?;
        Some(tree.selection(Some(block.node), 0, last))
    }
}

#[cfg(test)]
#[path = "tests/selection.rs"]
mod tests;
