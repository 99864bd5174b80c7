//! Log-space co-occurrence scoring.
//!
//! For a candidate `C = {i_1, ..., i_k}` over `N` records with joint count
//! `j` and marginal counts `c_1..c_k`:
//!
//! ```text
//! score(C) = ln(j) + (k - 1) ln(N) - Σ ln(c_m)
//!          = ln( j · N^(k-1) / Π c_m )
//! ```
//!
//! i.e. how many times more often the group co-occurs than independence
//! predicts, weighted by `j`. Products of counts and `N^(k-1)` overflow fast
//! for k >= 3, so everything stays in log space.

use super::ItemSet;
use crate::data::BinaryMatrix;
use crate::error::{GroupsError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores every candidate, in order.
///
/// Candidates whose joint count is below `min_support` score
/// `f64::NEG_INFINITY`. With the `parallel` feature the candidates are
/// scored on the rayon pool; output order is unchanged.
///
/// # Errors
///
/// Fails fast on the first candidate [`log_score`] rejects.
pub fn log_scores(
    data: &BinaryMatrix,
    candidates: &[ItemSet],
    min_support: usize,
) -> Result<Vec<f64>> {
    #[cfg(feature = "parallel")]
    {
        candidates
            .par_iter()
            .map(|candidate| log_score(data, candidate, min_support))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        log_scores_sequential(data, candidates, min_support)
    }
}

/// Single-threaded [`log_scores`].
///
/// # Errors
///
/// See [`log_score`].
pub fn log_scores_sequential(
    data: &BinaryMatrix,
    candidates: &[ItemSet],
    min_support: usize,
) -> Result<Vec<f64>> {
    candidates
        .iter()
        .map(|candidate| log_score(data, candidate, min_support))
        .collect()
}

/// Scores one candidate.
///
/// # Errors
///
/// - [`GroupsError::InvalidItemSet`] for an empty candidate or an item id
///   outside `data`.
/// - [`GroupsError::NumericDomain`] when a count that reaches the log is 0.
///   That means an item with no occurrences got past the singleton filter
///   (or `min_support` is 0); it is never turned into `-inf`.
///
/// # Examples
///
/// ```
/// use ingredient_groups::data::BinaryMatrix;
/// use ingredient_groups::mining::{log_score, ItemSet};
///
/// let data = BinaryMatrix::from_transactions(
///     vec!["a".into(), "b".into()],
///     &[vec![0, 1], vec![0, 1], vec![0], vec![]],
/// )
/// .unwrap();
///
/// // ln(2) + ln(4) - ln(3) - ln(2) = ln(4/3)
/// let score = log_score(&data, &ItemSet::from_items([0, 1]), 1).unwrap();
/// assert!((score - (4.0f64 / 3.0).ln()).abs() < 1e-12);
///
/// let below = log_score(&data, &ItemSet::from_items([0, 1]), 3).unwrap();
/// assert_eq!(below, f64::NEG_INFINITY);
/// ```
pub fn log_score(data: &BinaryMatrix, candidate: &ItemSet, min_support: usize) -> Result<f64> {
    let occurrence_sets = candidate
        .iter()
        .map(|item| {
            data.occurrences(item)
                .ok_or_else(|| GroupsError::InvalidItemSet {
                    message: format!(
                        "item {item} of {candidate} is outside the {} columns",
                        data.n_items()
                    ),
                })
        })
        .collect::<Result<Vec<&[usize]>>>()?;

    if occurrence_sets.is_empty() {
        return Err(GroupsError::InvalidItemSet {
            message: "cannot score an empty item set".to_string(),
        });
    }

    let joint = joint_count(&occurrence_sets);
    if joint < min_support {
        return Ok(f64::NEG_INFINITY);
    }

    let k = occurrence_sets.len();
    let mut score = ln_count(joint, || format!("joint count of {candidate}"))?;
    score += (k - 1) as f64 * ln_count(data.n_records(), || "record count".to_string())?;
    for (item, occurrences) in candidate.iter().zip(&occurrence_sets) {
        score -= ln_count(occurrences.len(), || format!("marginal count of item {item}"))?;
    }

    Ok(score)
}

/// Size of the intersection of sorted occurrence lists.
///
/// Walks the shortest list and binary-searches the others.
#[must_use]
pub fn joint_count(occurrence_sets: &[&[usize]]) -> usize {
    let Some(shortest) = occurrence_sets.iter().min_by_key(|occ| occ.len()) else {
        return 0;
    };
    shortest
        .iter()
        .filter(|&&record| {
            occurrence_sets
                .iter()
                .all(|occ| occ.binary_search(&record).is_ok())
        })
        .count()
}

fn ln_count(count: usize, context: impl FnOnce() -> String) -> Result<f64> {
    if count == 0 {
        return Err(GroupsError::NumericDomain {
            context: context(),
            count,
        });
    }
    Ok((count as f64).ln())
}
