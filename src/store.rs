//! Persisted ingredient groups.
//!
//! File layout:
//!
//! ```text
//! [4-byte magic: "IGRP"]
//! [1-byte major version][1-byte minor version]
//! [8-byte payload length, little-endian]
//! [bincode payload: IngredientGroups]
//! [4-byte CRC32 of everything above, little-endian]
//! ```
//!
//! The payload keeps the (sets by index, sets by name, scores) triple plus
//! the ingredient vocabulary, so a saved file is enough to answer queries.

use crate::data::BinaryMatrix;
use crate::error::{GroupsError, Result};
use crate::mining::{ItemSet, MiningResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// File magic.
pub const MAGIC: [u8; 4] = *b"IGRP";
/// Current format version (major, minor).
pub const FORMAT_VERSION: (u8, u8) = (1, 0);

const HEADER_SIZE: usize = 4 + 2 + 8;
const CHECKSUM_SIZE: usize = 4;

/// Mined groups resolved to names, ready to save or query.
///
/// `item_sets`, `named` and `scores` are parallel: entry `i` of each
/// describes the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroups {
    /// Groups as item ids
    pub item_sets: Vec<ItemSet>,
    /// Groups as column names, in item id order
    pub named: Vec<Vec<String>>,
    /// Natural-log scores
    pub scores: Vec<f64>,
    /// Every ingredient column of the mined dataset
    pub ingredients: Vec<String>,
}

impl IngredientGroups {
    /// Resolves a mining result against the dataset it came from.
    ///
    /// # Errors
    ///
    /// Returns [`GroupsError::InvalidItemSet`] if an item id has no column
    /// in `data`.
    pub fn from_result(result: &MiningResult, data: &BinaryMatrix) -> Result<Self> {
        let mut item_sets = Vec::with_capacity(result.len());
        let mut named = Vec::with_capacity(result.len());
        let mut scores = Vec::with_capacity(result.len());

        for group in result.groups() {
            let names = group
                .items
                .iter()
                .map(|item| {
                    data.item_name(item)
                        .map(str::to_string)
                        .ok_or_else(|| GroupsError::InvalidItemSet {
                            message: format!("item {item} has no column name"),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            item_sets.push(group.items.clone());
            named.push(names);
            scores.push(group.score);
        }

        Ok(Self {
            item_sets,
            named,
            scores,
            ingredients: data.item_names().to_vec(),
        })
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates (names, score) per group.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], f64)> {
        self.named
            .iter()
            .zip(&self.scores)
            .map(|(names, &score)| (names.as_slice(), score))
    }

    fn check_parallel(&self) -> Result<()> {
        let n = self.scores.len();
        if self.item_sets.len() != n {
            return Err(GroupsError::dimension_mismatch("item_sets", n, self.item_sets.len()));
        }
        if self.named.len() != n {
            return Err(GroupsError::dimension_mismatch("named", n, self.named.len()));
        }
        Ok(())
    }

    /// Encodes to the file layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the three lists differ in length or encoding
    /// fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.check_parallel()?;
        let payload = bincode::serialize(self)
            .map_err(|e| GroupsError::Serialization(format!("Failed to serialize groups: {e}")))?;

        let mut content = Vec::with_capacity(HEADER_SIZE + payload.len() + CHECKSUM_SIZE);
        content.extend_from_slice(&MAGIC);
        content.push(FORMAT_VERSION.0);
        content.push(FORMAT_VERSION.1);
        content.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        content.extend_from_slice(&payload);

        let checksum = crc32fast::hash(&content);
        content.extend_from_slice(&checksum.to_le_bytes());
        Ok(content)
    }

    /// Decodes the file layout.
    ///
    /// # Errors
    ///
    /// - [`GroupsError::Format`]: wrong magic, truncated, or bad length
    /// - [`GroupsError::ChecksumMismatch`]: corrupted contents
    /// - [`GroupsError::UnsupportedVersion`]: newer major version
    /// - [`GroupsError::Serialization`]: payload does not decode
    pub fn from_bytes(content: &[u8]) -> Result<Self> {
        if content.len() < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(GroupsError::Format {
                message: format!("File too small: {} bytes", content.len()),
            });
        }
        if content[..4] != MAGIC {
            return Err(GroupsError::Format {
                message: "missing IGRP magic".to_string(),
            });
        }

        let (body, trailer) = content.split_at(content.len() - CHECKSUM_SIZE);
        let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let computed = crc32fast::hash(body);
        if stored != computed {
            return Err(GroupsError::ChecksumMismatch {
                expected: stored,
                actual: computed,
            });
        }

        let major = body[4];
        if major > FORMAT_VERSION.0 {
            return Err(GroupsError::UnsupportedVersion {
                found: major,
                supported: FORMAT_VERSION.0,
            });
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&body[6..HEADER_SIZE]);
        let payload_len = u64::from_le_bytes(len_bytes);
        let payload = &body[HEADER_SIZE..];
        if payload.len() as u64 != payload_len {
            return Err(GroupsError::Format {
                message: format!(
                    "payload length {payload_len} does not match {} bytes present",
                    payload.len()
                ),
            });
        }

        let groups: Self = bincode::deserialize(payload)
            .map_err(|e| GroupsError::Serialization(format!("Failed to deserialize groups: {e}")))?;
        groups.check_parallel()?;
        Ok(groups)
    }

    /// Writes the groups to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes()?)?;
        info!(path = %path.display(), groups = self.len(), "saved ingredient groups");
        Ok(())
    }

    /// Reads groups from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let groups = Self::from_bytes(&fs::read(path)?)?;
        info!(path = %path.display(), groups = groups.len(), "loaded ingredient groups");
        Ok(groups)
    }
}
