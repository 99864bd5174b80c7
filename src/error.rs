//! Error types for ingredient group mining.
//!
//! One taxonomy covers the numeric core, ingestion, configuration and the
//! result file. Lookup misses in the query surface are not errors; see
//! [`crate::query::QueryOutcome::NotFound`].

use thiserror::Error;

/// Main error type for mining, loading and persisting ingredient groups.
///
/// # Examples
///
/// ```
/// use ingredient_groups::error::GroupsError;
///
/// let err = GroupsError::NumericDomain {
///     context: "marginal count of item 3".to_string(),
///     count: 0,
/// };
/// assert!(err.to_string().contains("log of non-positive count"));
/// ```
#[derive(Error, Debug)]
pub enum GroupsError {
    /// Attempted to take the log of a count that is zero.
    ///
    /// Means an item passed the singleton filter but has no occurrences,
    /// which breaks a core invariant. Never coerced to `-inf`.
    #[error("Numeric domain error: log of non-positive count {count} ({context})")]
    NumericDomain {
        /// What was being counted
        context: String,
        /// Offending count
        count: usize,
    },

    /// An item set that cannot be scored (empty, or item out of range).
    #[error("Invalid item set: {message}")]
    InvalidItemSet {
        /// Error description
        message: String,
    },

    /// Invalid threshold or size cap.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A value outside {0, 1} reached the binary matrix.
    #[error("Column '{column}' is not binary: found value {value}")]
    NonBinaryColumn {
        /// Column name
        column: String,
        /// Offending value
        value: String,
    },

    /// Two columns share a name.
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// Column lengths disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Nothing to work with.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Malformed CSV input.
    #[error("CSV error at line {line}: {message}")]
    Csv {
        /// 1-based line number (header is line 1)
        line: u64,
        /// Error description
        message: String,
    },

    /// Malformed configuration file.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload encode/decode failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Result file is not an ingredient groups file or is truncated.
    #[error("Invalid groups file: {message}")]
    Format {
        /// Error description
        message: String,
    },

    /// Result file written by a newer major version.
    #[error("Unsupported format version: found major {found}, max supported major {supported}")]
    UnsupportedVersion {
        /// Major version found
        found: u8,
        /// Maximum supported major version
        supported: u8,
    },

    /// Result file checksum does not match its contents.
    #[error("Checksum mismatch: expected 0x{expected:08X}, got 0x{actual:08X}")]
    ChecksumMismatch {
        /// Stored checksum
        expected: u32,
        /// Computed checksum
        actual: u32,
    },
}

impl GroupsError {
    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, GroupsError>;
