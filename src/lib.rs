//! blockwise: structural selection, navigation and reordering over tree-sitter trees.
//!
//! A document is parsed into a [`FileTree`] snapshot. Caller ranges resolve to
//! [`Selection`]s over sibling blocks, which grow, shrink, step and swap; pairs of
//! delimiters around a cursor toggle between their inside and outside. Every operation is a
//! synchronous function of one snapshot and hands back ranges (or an edit) for the caller to
//! apply.

#![allow(clippy::multiple_crate_versions)]

pub mod block;
pub mod commands;
pub mod config;
pub mod context;
pub mod edit_plan;
pub mod error;
pub mod formats;
pub mod movement;
pub mod pair;
pub mod selection;
pub mod syntax;

pub use block::{Block, FileTree, SnapshotId};
pub use error::{Error, Result};
pub use movement::{move_selection, MoveOutcome, Swap, TriviaPolicy};
pub use pair::{find_containing_pair, select_inside, select_surrounding_pair, Pair, PairTable};
pub use selection::{Extend, ParentMode, Selection};
pub use syntax::{NodeId, Point, TextRange};
