//! Mining configuration.
//!
//! Thresholds default to the values the recipe analysis was tuned with
//! (`min_support = 15`, `min_score = 3.5`, `max_size = 3`). A TOML file can
//! override them and list columns to exclude by name:
//!
//! ```toml
//! min_support = 20
//! min_score = 2.0
//! max_size = 4
//! exclude = ["bon appétit", "gourmet"]
//! exclude_file = "excluded_tags.txt"
//! ```

use crate::error::{GroupsError, Result};
use crate::mining::CooccurrenceMiner;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default minimum support (records).
pub const DEFAULT_MIN_SUPPORT: usize = 15;
/// Default minimum score (ratio, compared as `ln(min_score)`).
pub const DEFAULT_MIN_SCORE: f64 = 3.5;
/// Default largest group size.
pub const DEFAULT_MAX_SIZE: usize = 3;

/// Thresholds and column exclusions for one mining run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Minimum record count for singletons (strict) and groups (inclusive).
    pub min_support: usize,
    /// Minimum co-occurrence ratio, in linear space.
    pub min_score: f64,
    /// Largest group size to search.
    pub max_size: usize,
    /// Column names to drop before mining.
    pub exclude: Vec<String>,
    /// File with more column names to drop, one per line.
    pub exclude_file: Option<PathBuf>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_score: DEFAULT_MIN_SCORE,
            max_size: DEFAULT_MAX_SIZE,
            exclude: Vec::new(),
            exclude_file: None,
        }
    }
}

impl MiningConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GroupsError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GroupsError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// A relative `exclude_file` is resolved against the config file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(file), Some(dir)) = (config.exclude_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }
        Ok(config)
    }

    /// Checks the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`GroupsError::InvalidHyperparameter`] for a threshold the
    /// miner would reject.
    pub fn validate(&self) -> Result<()> {
        self.miner().validate()
    }

    /// Builds a miner with these thresholds.
    #[must_use]
    pub fn miner(&self) -> CooccurrenceMiner {
        CooccurrenceMiner::new()
            .with_min_support(self.min_support)
            .with_min_score(self.min_score)
            .with_max_size(self.max_size)
    }

    /// Collects the inline `exclude` names and the `exclude_file` contents.
    ///
    /// # Errors
    ///
    /// Returns an error if `exclude_file` cannot be read.
    pub fn exclusions(&self) -> Result<ExclusionList> {
        let mut list = ExclusionList::from_names(self.exclude.iter().cloned());
        if let Some(path) = &self.exclude_file {
            list.extend(ExclusionList::from_file(path)?);
        }
        Ok(list)
    }
}

/// Column names to drop during ingestion.
///
/// Names, not positions, so the list survives schema changes in the CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    names: BTreeSet<String>,
}

impl ExclusionList {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses one name per line; blank lines and `#` comments are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Reads a list file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Adds every name from `other`.
    pub fn extend(&mut self, other: ExclusionList) {
        self.names.extend(other.names);
    }

    /// True if `name` is excluded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
