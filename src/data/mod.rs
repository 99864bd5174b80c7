//! Binary record x item matrix with named columns.
//!
//! Stored column-major: each item keeps the sorted indices of the records it
//! appears in. That is the only view the miner needs, and it makes joint
//! support an intersection of sorted lists.

pub mod csv;

pub use self::csv::{write_column_index, RecipeLoader};

use crate::error::{GroupsError, Result};
use std::collections::HashSet;

/// Records x binary items, with a name per item.
///
/// # Examples
///
/// ```
/// use ingredient_groups::data::BinaryMatrix;
///
/// let data = BinaryMatrix::from_columns(vec![
///     ("basil".to_string(), vec![1, 1, 0]),
///     ("tomato".to_string(), vec![1, 0, 1]),
/// ])
/// .expect("binary columns of equal length");
///
/// assert_eq!(data.shape(), (3, 2));
/// assert_eq!(data.support(0), Some(2));
/// assert_eq!(data.occurrences(1), Some(&[0, 2][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    names: Vec<String>,
    occurrences: Vec<Vec<usize>>,
    n_records: usize,
}

impl BinaryMatrix {
    /// Builds a matrix from named 0/1 columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is not 0 or 1, columns differ in length,
    /// or a name is empty or repeated.
    pub fn from_columns(columns: Vec<(String, Vec<u8>)>) -> Result<Self> {
        let n_records = columns.first().map_or(0, |(_, col)| col.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut occurrences = Vec::with_capacity(columns.len());

        for (name, col) in columns {
            if col.len() != n_records {
                return Err(GroupsError::dimension_mismatch(
                    &format!("rows of column '{name}'"),
                    n_records,
                    col.len(),
                ));
            }
            if let Some(&bad) = col.iter().find(|&&v| v > 1) {
                return Err(GroupsError::NonBinaryColumn {
                    column: name,
                    value: bad.to_string(),
                });
            }
            let present = col
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v == 1)
                .map(|(row, _)| row)
                .collect();
            names.push(name);
            occurrences.push(present);
        }

        Self::from_occurrences(names, occurrences, n_records)
    }

    /// Builds a matrix from transactions, each listing the items present.
    ///
    /// # Errors
    ///
    /// Returns an error if a transaction names an item outside `names`, or
    /// a name is empty or repeated.
    pub fn from_transactions(names: Vec<String>, transactions: &[Vec<usize>]) -> Result<Self> {
        let mut occurrences = vec![Vec::new(); names.len()];
        for (row, transaction) in transactions.iter().enumerate() {
            for &item in transaction {
                let list = occurrences
                    .get_mut(item)
                    .ok_or_else(|| GroupsError::InvalidItemSet {
                        message: format!(
                            "transaction {row} references item {item}, only {} items",
                            names.len()
                        ),
                    })?;
                if list.last() != Some(&row) {
                    list.push(row);
                }
            }
        }
        Self::from_occurrences(names, occurrences, transactions.len())
    }

    fn from_occurrences(
        names: Vec<String>,
        occurrences: Vec<Vec<usize>>,
        n_records: usize,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() {
                return Err(GroupsError::empty_input("column name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(GroupsError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            names,
            occurrences,
            n_records,
        })
    }

    /// Returns the shape as (`n_records`, `n_items`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_records, self.names.len())
    }

    /// Number of records (N).
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Number of item columns.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.names.len()
    }

    /// True when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_records == 0
    }

    /// Column names, indexed by item id.
    #[must_use]
    pub fn item_names(&self) -> &[String] {
        &self.names
    }

    /// Name of an item.
    #[must_use]
    pub fn item_name(&self, item: usize) -> Option<&str> {
        self.names.get(item).map(String::as_str)
    }

    /// Item id for a column name (exact match).
    #[must_use]
    pub fn item_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Sorted record indices where `item` is present.
    #[must_use]
    pub fn occurrences(&self, item: usize) -> Option<&[usize]> {
        self.occurrences.get(item).map(Vec::as_slice)
    }

    /// Marginal occurrence count of `item`.
    #[must_use]
    pub fn support(&self, item: usize) -> Option<usize> {
        self.occurrences.get(item).map(Vec::len)
    }

    /// Iterates over (item id, name, marginal count).
    pub fn iter_items(&self) -> impl Iterator<Item = (usize, &str, usize)> {
        self.names
            .iter()
            .zip(&self.occurrences)
            .enumerate()
            .map(|(item, (name, occ))| (item, name.as_str(), occ.len()))
    }
}
