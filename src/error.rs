//! Error taxonomy for structural operations.
//!
//! Boundary conditions in the core (no previous sibling, no pair found) are plain `None`
//! results. These variants are reserved for the command layer, the move engine and the
//! external collaborators (parser, config, filesystem).

use crate::syntax::TextRange;
use std::io;
use thiserror::Error;

/// Failure reasons surfaced to the caller. None of them are fatal: every one degrades to
/// "no change" for the document in question.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's range does not sit on block boundaries.
    #[error("range {0} does not align with block boundaries")]
    NotAligned(TextRange),

    #[error("no adjacent sibling in that direction")]
    /// No sibling block in the requested direction.
    NoAdjacentSibling,

    #[error("selection has no selectable parent")]
    /// Nothing to grow to.
    NoParent,

    #[error("selection has no child blocks")]
    /// Nothing to shrink to.
    NoChild,

    /// Separator text between two swapped blocks could not be partitioned safely.
    #[error("separator at {0} cannot be partitioned unambiguously")]
    AmbiguousTrivia(TextRange),

    /// A selection was used with a tree other than the snapshot it was built from.
    #[error("selection belongs to a different snapshot")]
    StaleSelection,

    #[error("language not found: {0}")]
    /// No built-in format matches the name or extension.
    LanguageNotFound(String),

    #[error("failed to load parser for {language}: {reason}")]
    /// The grammar could not be loaded or produced no tree.
    ParserLoadFailed {
        /// Format name.
        language: String,
        /// Message from tree-sitter.
        reason: String,
    },

    #[error("invalid block query for {language}: {reason}")]
    /// The format's block query does not compile.
    InvalidQuery {
        /// Format name.
        language: String,
        /// Message from tree-sitter.
        reason: String,
    },

    /// Edit range out of bounds or not on a char boundary.
    #[error("edit range {0} is not valid for this text")]
    InvalidEdit(TextRange),

    #[error("edits overlap at {0}")]
    /// Two edits of one plan touch the same bytes.
    OverlappingEdits(TextRange),

    #[error("invalid configuration: {0}")]
    /// The configuration file could not be parsed.
    Config(String),

    #[error(transparent)]
    /// Reading or writing a file failed.
    Io(#[from] io::Error),
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
