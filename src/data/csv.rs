//! CSV ingestion for one-hot recipe tables.
//!
//! A column is kept only if its distinct values are exactly {0, 1}; ratings,
//! nutrition figures, titles and constant columns fall out on their own.
//! Tags that are binary but not ingredients are dropped by name through an
//! [`ExclusionList`].

use super::BinaryMatrix;
use crate::config::ExclusionList;
use crate::error::{GroupsError, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-column scan state while reading rows.
#[derive(Debug)]
struct ColumnScan {
    name: String,
    values: Vec<u8>,
    seen_zero: bool,
    seen_one: bool,
    binary: bool,
}

impl ColumnScan {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: Vec::new(),
            seen_zero: false,
            seen_one: false,
            binary: true,
        }
    }

    fn push(&mut self, cell: &str) {
        if !self.binary {
            return;
        }
        match cell.trim().parse::<f64>() {
            Ok(v) if v == 0.0 => {
                self.seen_zero = true;
                self.values.push(0);
            }
            Ok(v) if v == 1.0 => {
                self.seen_one = true;
                self.values.push(1);
            }
            _ => {
                self.binary = false;
                self.values = Vec::new();
            }
        }
    }

    fn is_one_hot(&self) -> bool {
        self.binary && self.seen_zero && self.seen_one
    }
}

/// Loads a CSV into a [`BinaryMatrix`] of one-hot columns.
///
/// # Examples
///
/// ```
/// use ingredient_groups::config::ExclusionList;
/// use ingredient_groups::data::RecipeLoader;
///
/// let csv = "title,rating,basil,tomato,gourmet\n\
///            Caprese,4.5,1,1,1\n\
///            Pesto,4.0,1,0,0\n\
///            Soup,3.0,0,1,0\n";
///
/// let data = RecipeLoader::new()
///     .with_exclusions(ExclusionList::from_names(["gourmet"]))
///     .from_reader(csv.as_bytes())
///     .expect("valid csv");
///
/// assert_eq!(data.item_names(), ["basil", "tomato"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeLoader {
    exclusions: ExclusionList,
}

impl RecipeLoader {
    /// Loader with no exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops these column names after binary detection.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionList) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Loads a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a row is malformed,
    /// or no one-hot column survives.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<BinaryMatrix> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading recipes");
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    /// Loads CSV text from any reader.
    ///
    /// # Errors
    ///
    /// See [`RecipeLoader::load`].
    #[allow(clippy::wrong_self_convention)]
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<BinaryMatrix> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(&e, 1))?
            .clone();
        let mut columns: Vec<ColumnScan> = headers.iter().map(ColumnScan::new).collect();

        let mut n_rows = 0u64;
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(&e, n_rows + 2))?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                column.push(cell);
            }
            n_rows += 1;
        }

        let n_columns = columns.len();
        let one_hot: Vec<ColumnScan> = columns.into_iter().filter(ColumnScan::is_one_hot).collect();
        debug!(
            rows = n_rows,
            columns = n_columns,
            one_hot = one_hot.len(),
            "detected one-hot columns"
        );

        for name in self.exclusions.iter() {
            if !one_hot.iter().any(|c| c.name == name) {
                warn!(column = name, "excluded column is not a one-hot column of this file");
            }
        }

        let kept: Vec<(String, Vec<u8>)> = one_hot
            .into_iter()
            .filter(|c| !self.exclusions.contains(&c.name))
            .map(|c| (c.name, c.values))
            .collect();

        if kept.is_empty() {
            return Err(GroupsError::empty_input("no one-hot ingredient columns in CSV"));
        }
        info!(records = n_rows, items = kept.len(), "recipes loaded");

        BinaryMatrix::from_columns(kept)
    }
}

fn csv_error(err: &::csv::Error, fallback_line: u64) -> GroupsError {
    GroupsError::Csv {
        line: err.position().map_or(fallback_line, ::csv::Position::line),
        message: err.to_string(),
    }
}

/// Writes `index<TAB>name` for every column, one per line.
///
/// Used to review the detected tags when curating an exclusion list.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_column_index<W: Write>(data: &BinaryMatrix, mut writer: W) -> Result<()> {
    for (item, name, _) in data.iter_items() {
        writeln!(writer, "{item}\t{name}")?;
    }
    writer.flush()?;
    Ok(())
}
