//! Command layer for editor front ends.
//!
//! The core answers "nothing here" with `None`. Front ends want a reason to show the user,
//! so this layer runs one structural command over a set of caller ranges and turns absence
//! into the matching [`Error`] variant. A failed command never produces a partial result.

use crate::block::FileTree;
use crate::config::Config;
use crate::edit_plan::EditPlan;
use crate::error::{Error, Result};
use crate::movement::{move_selection, Swap};
use crate::pair::{merge_ranges, select_inside, select_surrounding_pair, PairTable};
use crate::selection::{Extend, Selection};
use crate::syntax::TextRange;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
/// Structural commands exposed to front ends.
pub enum Command {
    /// List the top-level blocks.
    Blocks,
    /// Select the smallest block under each cursor.
    Select,
    /// Grow each selection to its parent block.
    Parent,
    /// Shrink each single-block selection to its children.
    Child,
    /// Move each selection to the previous run of siblings.
    Previous,
    /// Move each selection to the next run of siblings.
    Next,
    /// Add the previous sibling to each selection.
    ExtendPrevious,
    /// Add the next sibling to each selection.
    ExtendNext,
    /// Swap the selection with its previous sibling.
    SwapPrevious,
    /// Swap the selection with its next sibling.
    SwapNext,
    /// Toggle between the inside and outside of the enclosing pair.
    Inside,
    /// Put cursors on the delimiters of the enclosing pair.
    Surrounding,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Result of a command: new ranges and, for swaps, the edit to apply.
pub struct Outcome {
    /// Resulting ranges, sorted and merged.
    pub ranges: Vec<TextRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Edit to apply, for swaps.
    pub edit: Option<EditPlan>,
}

impl Outcome {
    fn ranges(ranges: Vec<TextRange>) -> Self {
        Self { ranges, edit: None }
    }
}

/// Run `command` over `ranges` on `tree`.
///
/// # Errors
///
/// Returns the reason the command could not apply: [`Error::NotAligned`] for ranges that are
/// not block runs, [`Error::NoParent`], [`Error::NoChild`], [`Error::NoAdjacentSibling`],
/// or any error of the move engine.
pub fn execute(
    tree: &FileTree,
    command: Command,
    ranges: &[TextRange],
    config: &Config,
) -> Result<Outcome> {
    match command {
        Command::Blocks => Ok(Outcome::ranges(
            tree.blocks().iter().map(|block| block.range).collect(),
        )),
        Command::Select => {
            let selected = ranges
                .iter()
                .map(|range| {
                    tree.select_smallest(range.start)
                        .ok_or(Error::NotAligned(*range))
                        .and_then(|selection| range_of(tree, &selection))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Outcome::ranges(merge_ranges(selected)))
        }
        Command::Parent => {
            let mode = config.parent_mode();
            navigate(tree, ranges, |selection| {
                selection.parent(tree, mode).ok_or(Error::NoParent)
            })
        }
        Command::Child => navigate(tree, ranges, |selection| {
            selection.child(tree).ok_or(Error::NoChild)
        }),
        Command::Previous => navigate(tree, ranges, |selection| {
            selection.previous(tree).ok_or(Error::NoAdjacentSibling)
        }),
        Command::Next => navigate(tree, ranges, |selection| {
            selection.next(tree).ok_or(Error::NoAdjacentSibling)
        }),
        Command::ExtendPrevious => navigate(tree, ranges, |selection| {
            Ok(selection.extend(tree, Extend::Previous))
        }),
        Command::ExtendNext => navigate(tree, ranges, |selection| {
            Ok(selection.extend(tree, Extend::Next))
        }),
        Command::SwapPrevious => swap(tree, ranges, Swap::Previous, config),
        Command::SwapNext => swap(tree, ranges, Swap::Next, config),
        Command::Inside => Ok(Outcome::ranges(select_inside(
            tree,
            &PairTable::with_extra(&config.extra_pair_kinds),
            ranges,
        ))),
        Command::Surrounding => Ok(Outcome::ranges(select_surrounding_pair(
            tree,
            &PairTable::with_extra(&config.extra_pair_kinds),
            ranges,
        ))),
    }
}

fn resolve(tree: &FileTree, range: TextRange) -> Result<Selection> {
    tree.resolve(range).ok_or(Error::NotAligned(range))
}

fn range_of(tree: &FileTree, selection: &Selection) -> Result<TextRange> {
    selection.range(tree).ok_or(Error::StaleSelection)
}

fn navigate(
    tree: &FileTree,
    ranges: &[TextRange],
    step: impl Fn(&Selection) -> Result<Selection>,
) -> Result<Outcome> {
    let moved = ranges
        .iter()
        .map(|range| {
            let selection = resolve(tree, *range)?;
            range_of(tree, &step(&selection)?)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Outcome::ranges(merge_ranges(moved)))
}

/// Swaps operate on exactly one selection: a second edit would be computed against text the
/// first one already changed.
fn swap(tree: &FileTree, ranges: &[TextRange], direction: Swap, config: &Config) -> Result<Outcome> {
    let [range] = ranges else {
        return Err(Error::NotAligned(
            ranges.get(1).copied().unwrap_or_default(),
        ));
    };
    let selection = resolve(tree, *range)?;
    let outcome = move_selection(tree, &selection, direction, config.trivia_policy)?;
    Ok(Outcome {
        ranges: vec![outcome.moved],
        edit: Some(outcome.edit),
    })
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;
