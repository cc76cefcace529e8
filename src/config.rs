//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! We look for a blockwise.toml in the working directory and load settings from there when
//! present. This controls how swaps treat comments between blocks, whether growing to the
//! parent may reach the whole document, and lets users extend the pair and trivia tables.

use crate::error::{Error, Result};
use crate::movement::TriviaPolicy;
use crate::selection::ParentMode;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File name searched for in the working directory.
pub const CONFIG_FILE: &str = "blockwise.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from blockwise.toml or falling back to defaults.
pub struct Config {
    #[facet(default)]
    /// How comments between swapped blocks are treated: strict, stationary or attached.
    pub trivia_policy: TriviaPolicy,
    #[facet(default = false)]
    /// Whether growing to the parent of a top-level run selects the whole document.
    pub parent_includes_root: bool,
    #[facet(default = Vec::new())]
    /// Node kinds treated as delimited pairs in addition to the built-in table.
    pub extra_pair_kinds: Vec<String>,
    #[facet(default = Vec::new())]
    /// Node kinds treated as trivia in addition to the format's own.
    pub extra_trivia_kinds: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trivia_policy: TriviaPolicy::default(),
            parent_includes_root: false,
            extra_pair_kinds: Vec::new(),
            extra_trivia_kinds: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from blockwise.toml if present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or an unknown trivia policy.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    /// Parent growth mode selected by `parent_includes_root`.
    pub fn parent_mode(&self) -> ParentMode {
        if self.parent_includes_root {
            ParentMode::IncludeRoot
        } else {
            ParentMode::ExcludeRoot
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
