//! The edit plan carries document modifications produced by structural operations.
//!
//! Structural commands never touch the document themselves. They hand back a plan of byte
//! range replacements computed against one snapshot, and the caller applies it to the text
//! the snapshot was parsed from (or to the file on disk) and reparses.

use crate::error::{Error, Result};
use crate::syntax::TextRange;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
/// Serialisable collection of replacements for atomic application.
pub struct EditPlan {
    /// Non-overlapping replacements, in any order.
    pub edits: Vec<Edit>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Byte range and the text that replaces it.
pub struct Edit {
    /// Range in the original text to replace.
    pub range: TextRange,
    /// New content for the range.
    pub replacement: String,
}

impl EditPlan {
    #[must_use]
    /// Plan with one replacement.
    pub fn single(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            edits: vec![Edit {
                range,
                replacement: replacement.into(),
            }],
        }
    }

    #[must_use]
    /// True when the plan changes nothing.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all edits to `text`, returning the new text.
    ///
    /// Edits are applied back to front so earlier ranges stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEdit`] when a range is out of bounds, reversed or splits a
    /// character, and [`Error::OverlappingEdits`] when two ranges overlap.
    pub fn apply(&self, text: &str) -> Result<String> {
        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        edits.sort_by_key(|edit| edit.range);

        for edit in &edits {
            let range = edit.range;
            if range.start > range.end
                || range.end > text.len()
                || !text.is_char_boundary(range.start)
                || !text.is_char_boundary(range.end)
            {
                return Err(Error::InvalidEdit(range));
            }
        }
        if let Some(pair) = edits
            .windows(2)
            .find(|pair| pair[0].range.end > pair[1].range.start)
        {
            return Err(Error::OverlappingEdits(pair[1].range));
        }

        let mut output = text.to_string();
        for edit in edits.iter().rev() {
            output.replace_range(edit.range.as_std(), &edit.replacement);
        }
        Ok(output)
    }

    /// Apply the plan to a file in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or the plan does not fit its
    /// contents.
    pub fn apply_to_file(&self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let updated = self.apply(&content)?;
        fs::write(path, updated)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
