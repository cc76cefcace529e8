//! Move engine: swap a selected run with its neighbouring sibling block.
//!
//! The run and its neighbour trade places while the separator between them (commas,
//! whitespace, possibly comments) stays where it is. The result is a single replacement over
//! the union of the two spans plus the range the moved run occupies afterwards, which the
//! caller resolves against a reparsed tree.

use crate::block::FileTree;
use crate::edit_plan::EditPlan;
use crate::error::{Error, Result};
use crate::selection::Selection;
use crate::syntax::{NodeId, TextRange};
use clap::ValueEnum;
use facet::Facet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Direction of a swap, relative to the selected run.
pub enum Swap {
    /// Trade places with the sibling block before the run.
    Previous,
    /// Trade places with the sibling block after the run.
    Next,
}

#[derive(Facet, ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[facet(rename_all = "snake_case")]
#[repr(u8)]
/// How trivia nodes (comments) between swapped blocks are handled.
pub enum TriviaPolicy {
    /// Any trivia node in the separator aborts the swap.
    #[default]
    Strict,
    /// Trivia nodes in the separator stay in place.
    Stationary,
    /// Comments directly above a block, and on the same row right after it, move with it.
    Attached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of a successful swap.
pub struct MoveOutcome {
    /// Replacement to apply to the snapshot's text.
    pub edit: EditPlan,
    /// Range of the moved run in the edited text.
    pub moved: TextRange,
}

/// Span taking part in a swap: the blocks themselves plus any attached trivia.
#[derive(Clone, Copy, Debug)]
struct Span {
    outer: TextRange,
    core: TextRange,
}

/// Swap `selection` with the adjacent sibling block in `direction`.
///
/// # Errors
///
/// - [`Error::StaleSelection`] when the selection comes from another snapshot.
/// - [`Error::NoAdjacentSibling`] at the start/end of the sibling sequence, or at document
///   level.
/// - [`Error::AmbiguousTrivia`] when the separator holds text that cannot be kept in place
///   under `policy`.
pub fn move_selection(
    tree: &FileTree,
    selection: &Selection,
    direction: Swap,
    policy: TriviaPolicy,
) -> Result<MoveOutcome> {
    if selection.snapshot() != tree.snapshot() {
        return Err(Error::StaleSelection);
    }
    let parent = selection.parent_node().ok_or(Error::NoAdjacentSibling)?;
    let siblings = selection.siblings(tree);
    let (start, end) = (selection.start_index(), selection.end_index());
    if end >= siblings.len() {
        return Err(Error::StaleSelection);
    }

    let neighbour = match direction {
        Swap::Previous => start.checked_sub(1),
        Swap::Next => Some(end + 1).filter(|index| *index < siblings.len()),
    }
    .ok_or(Error::NoAdjacentSibling)?;

    let run = (siblings[start].node, siblings[end].node);
    let other = (siblings[neighbour].node, siblings[neighbour].node);
    let (first_nodes, second_nodes) = match direction {
        Swap::Previous => (other, run),
        Swap::Next => (run, other),
    };

    let (first, second) = spans(tree, parent, first_nodes, second_nodes, policy);
    let separator = TextRange::new(first.outer.end, second.outer.start);
    check_separator(tree, parent, separator, policy)?;

    // Line terminators that end a span stay in their slot, so a block at the end of the file
    // without a final newline does not fuse with the block moved in front of it.
    let (first_body, first_end) = split_terminator(tree, first.outer);
    let (second_body, second_end) = split_terminator(tree, second.outer);
    let replacement = [second_body, first_end, separator, first_body, second_end]
        .into_iter()
        .map(|range| tree.text(range))
        .collect::<String>();
    let union = TextRange::new(first.outer.start, second.outer.end);

    // Where the run's own blocks land once the two spans have traded places, including the
    // terminator that now follows them.
    let moved = match direction {
        Swap::Previous => relocate(second, second_body, first_end, union.start),
        Swap::Next => relocate(
            first,
            first_body,
            second_end,
            union.start + second_body.len() + first_end.len() + separator.len(),
        ),
    };

    tracing::debug!(
        ?direction,
        ?policy,
        union = %union,
        moved = %moved,
        "Swapped sibling blocks"
    );

    Ok(MoveOutcome {
        edit: EditPlan::single(union, replacement),
        moved,
    })
}

/// Split `range` into its text and the run of line terminators that ends it.
fn split_terminator(tree: &FileTree, range: TextRange) -> (TextRange, TextRange) {
    let body = tree.text(range).trim_end_matches(['\r', '\n']).len();
    let split = range.start + body;
    (
        TextRange::new(range.start, split),
        TextRange::new(split, range.end),
    )
}

/// Range of `span`'s core once its body is placed at `at` and followed by `terminator`.
fn relocate(span: Span, body: TextRange, terminator: TextRange, at: usize) -> TextRange {
    let start = at + (span.core.start - span.outer.start);
    let end = at + (span.core.end.min(body.end) - span.outer.start);
    if span.core.end >= body.end {
        TextRange::new(start, end + terminator.len())
    } else {
        TextRange::new(start, end)
    }
}

/// Spans of the earlier and later participants, widened by attached trivia under
/// [`TriviaPolicy::Attached`]. `first` and `second` are (first node, last node) pairs.
fn spans(
    tree: &FileTree,
    parent: NodeId,
    first: (NodeId, NodeId),
    second: (NodeId, NodeId),
    policy: TriviaPolicy,
) -> (Span, Span) {
    let syntax = tree.syntax();
    let core = |(from, to): (NodeId, NodeId)| {
        TextRange::new(syntax.range(from).start, syntax.range(to).end)
    };
    let mut first_span = Span {
        outer: core(first),
        core: core(first),
    };
    let mut second_span = Span {
        outer: core(second),
        core: core(second),
    };

    if policy == TriviaPolicy::Attached {
        let children = syntax.children(parent);
        let position = |node: NodeId| children.iter().position(|child| *child == node);

        if let Some(index) = position(first.0) {
            first_span.outer.start = leading_trivia_start(tree, children, index, 0);
        }
        if let Some(index) = position(first.1) {
            first_span.outer.end = trailing_trivia_end(tree, children, index);
        }
        if let Some(index) = position(second.0) {
            second_span.outer.start =
                leading_trivia_start(tree, children, index, first_span.outer.end);
        }
        if let Some(index) = position(second.1) {
            second_span.outer.end = trailing_trivia_end(tree, children, index);
        }
    }

    (first_span, second_span)
}

/// Start of the comment run directly above `children[index]`, not reaching before `floor`.
/// A blank line between a comment and what follows it breaks the run, as does a comment
/// that ends the row of the node before it.
fn leading_trivia_start(tree: &FileTree, children: &[NodeId], index: usize, floor: usize) -> usize {
    let syntax = tree.syntax();
    let mut start = syntax.range(children[index]).start;
    for position in (0..index).rev() {
        let candidate = children[position];
        let range = syntax.range(candidate);
        if !tree.is_trivia(candidate) || range.start < floor {
            break;
        }
        // A comment sharing a row with the node before it trails that node.
        let trails_previous = position > 0
            && syntax.end_point(children[position - 1]).row == syntax.start_point(candidate).row;
        if trails_previous {
            break;
        }
        let gap = tree.text(TextRange::new(range.end, start));
        if !gap.trim().is_empty() || gap.matches('\n').count() > 1 {
            break;
        }
        start = range.start;
    }
    start
}

/// End of a comment starting on the row where `children[index]` ends, if one follows it.
fn trailing_trivia_end(tree: &FileTree, children: &[NodeId], index: usize) -> usize {
    let syntax = tree.syntax();
    let node = children[index];
    let end = syntax.range(node).end;
    let Some(next) = children.get(index + 1).copied() else {
        return end;
    };
    let gap = tree.text(TextRange::new(end, syntax.range(next).start));
    let same_row = syntax.start_point(next).row == syntax.end_point(node).row;
    if tree.is_trivia(next) && same_row && gap.trim().is_empty() {
        syntax.range(next).end
    } else {
        end
    }
}

/// The separator must split into whitespace, anonymous tokens and (policy permitting)
/// trivia nodes. Anything else means we cannot tell what belongs to which side.
fn check_separator(
    tree: &FileTree,
    parent: NodeId,
    separator: TextRange,
    policy: TriviaPolicy,
) -> Result<()> {
    let syntax = tree.syntax();
    let mut cursor = separator.start;

    for child in syntax.children(parent).iter().copied() {
        let range = syntax.range(child);
        if range.end <= separator.start || range.is_empty() {
            continue;
        }
        if range.start >= separator.end {
            break;
        }
        if !separator.contains_range(range) {
            return Err(Error::AmbiguousTrivia(separator));
        }
        let keeps_in_place = if tree.is_trivia(child) {
            policy != TriviaPolicy::Strict
        } else {
            !syntax.is_named(child)
        };
        if !keeps_in_place || !tree.text(TextRange::new(cursor, range.start)).trim().is_empty() {
            return Err(Error::AmbiguousTrivia(separator));
        }
        cursor = range.end;
    }

    if tree.text(TextRange::new(cursor, separator.end)).trim().is_empty() {
        Ok(())
    } else {
        Err(Error::AmbiguousTrivia(separator))
    }
}

#[cfg(test)]
#[path = "tests/movement.rs"]
mod tests;
