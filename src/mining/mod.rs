//! Level-wise mining of over-represented item groups.
//!
//! The search is shaped like Apriori but learns no rules: it keeps item sets
//! whose members co-occur far more often than independence predicts, at any
//! size up to a cap.
//!
//! # Algorithm
//!
//! 1. `F_1`: singletons whose marginal count is strictly greater than
//!    `min_support`
//! 2. Candidates of size k from `F_{k-1} x F_1` ([`generate_candidates`])
//! 3. Log-space score per candidate ([`log_scores`]); keep
//!    `score >= ln(min_score)`
//! 4. Repeat until a level is empty or k reaches `max_size`
//!
//! # Example
//!
//! ```
//! use ingredient_groups::data::BinaryMatrix;
//! use ingredient_groups::mining::CooccurrenceMiner;
//!
//! // basil and tomato always together, garlic everywhere
//! let data = BinaryMatrix::from_transactions(
//!     vec!["basil".into(), "tomato".into(), "garlic".into()],
//!     &[vec![0, 1, 2], vec![0, 1, 2], vec![2], vec![2]],
//! )
//! .unwrap();
//!
//! let result = CooccurrenceMiner::new()
//!     .with_min_support(1)
//!     .with_min_score(1.5)
//!     .with_max_size(2)
//!     .fit(&data)
//!     .unwrap();
//!
//! for group in result.groups() {
//!     println!("{} (score={:.3})", group.items, group.score);
//! }
//! assert_eq!(result.len(), 1);
//! ```

mod candidates;
mod itemset;
mod score;

pub use candidates::generate_candidates;
pub use itemset::ItemSet;
pub use score::{joint_count, log_score, log_scores, log_scores_sequential};

use crate::config::{DEFAULT_MAX_SIZE, DEFAULT_MIN_SCORE, DEFAULT_MIN_SUPPORT};
use crate::data::BinaryMatrix;
use crate::error::{GroupsError, Result};
use tracing::{debug, info};

/// An item set that passed both thresholds, with its log score.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentSet {
    /// Members
    pub items: ItemSet,
    /// Natural-log co-occurrence score
    pub score: f64,
}

/// Candidate and survivor counts for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    /// Set size k
    pub level: usize,
    /// Candidates generated
    pub candidates: usize,
    /// Candidates that passed support and score
    pub frequent: usize,
}

/// Output of [`CooccurrenceMiner::fit`].
///
/// `groups` holds every frequent set of size >= 2 in discovery order: level
/// by level, and within a level in candidate order. Singletons are kept apart
/// in `singletons` and are not results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiningResult {
    groups: Vec<FrequentSet>,
    singletons: Vec<(ItemSet, usize)>,
    levels: Vec<LevelSummary>,
}

impl MiningResult {
    /// Frequent sets with scores.
    #[must_use]
    pub fn groups(&self) -> &[FrequentSet] {
        &self.groups
    }

    /// Frequent sets, same order as [`MiningResult::scores`].
    pub fn item_sets(&self) -> impl Iterator<Item = &ItemSet> {
        self.groups.iter().map(|g| &g.items)
    }

    /// Log scores, same order as [`MiningResult::item_sets`].
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.groups.iter().map(|g| g.score)
    }

    /// Splits into parallel (sets, scores) vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ItemSet>, Vec<f64>) {
        self.groups.into_iter().map(|g| (g.items, g.score)).unzip()
    }

    /// `F_1` with marginal counts.
    #[must_use]
    pub fn singletons(&self) -> &[(ItemSet, usize)] {
        &self.singletons
    }

    /// One summary per level searched, starting at k = 2.
    #[must_use]
    pub fn levels(&self) -> &[LevelSummary] {
        &self.levels
    }

    /// Frequent sets of exactly `k` items.
    pub fn level(&self, k: usize) -> impl Iterator<Item = &FrequentSet> {
        self.groups.iter().filter(move |g| g.items.len() == k)
    }

    /// Number of frequent sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if nothing passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Level-wise co-occurrence miner.
///
/// # Parameters
///
/// - `min_support`: singletons need a count `> min_support`; groups need a
///   joint count `>= min_support`. Must be at least 1.
/// - `min_score`: minimum co-occurrence ratio (linear); compared as
///   `ln(min_score)`. Must be finite and positive.
/// - `max_size`: largest group size searched. Must be at least 2.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMiner {
    min_support: usize,
    min_score: f64,
    max_size: usize,
}

impl CooccurrenceMiner {
    /// Create a miner with the default thresholds.
    ///
    /// # Default Parameters
    ///
    /// - `min_support`: 15
    /// - `min_score`: 3.5
    /// - `max_size`: 3
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_score: DEFAULT_MIN_SCORE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Set the minimum support (record count).
    #[must_use]
    pub fn with_min_support(mut self, min_support: usize) -> Self {
        self.min_support = min_support;
        self
    }

    /// Set the minimum score (linear ratio).
    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the largest group size.
    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Minimum support.
    #[must_use]
    pub fn min_support(&self) -> usize {
        self.min_support
    }

    /// Minimum score (linear ratio).
    #[must_use]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Largest group size.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Checks the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`GroupsError::InvalidHyperparameter`] naming the bad value.
    pub fn validate(&self) -> Result<()> {
        if self.min_support == 0 {
            return Err(GroupsError::invalid_hyperparameter(
                "min_support",
                self.min_support,
                ">= 1",
            ));
        }
        if !self.min_score.is_finite() || self.min_score <= 0.0 {
            return Err(GroupsError::invalid_hyperparameter(
                "min_score",
                self.min_score,
                "finite and > 0",
            ));
        }
        if self.max_size < 2 {
            return Err(GroupsError::invalid_hyperparameter(
                "max_size",
                self.max_size,
                ">= 2",
            ));
        }
        Ok(())
    }

    /// `F_1`: items whose marginal count is strictly above `min_support`.
    fn frequent_singletons(&self, data: &BinaryMatrix) -> Vec<(ItemSet, usize)> {
        data.iter_items()
            .filter(|&(_, _, count)| count > self.min_support)
            .map(|(item, _, count)| (ItemSet::singleton(item), count))
            .collect()
    }

    /// Runs the level-wise search.
    ///
    /// An empty dataset, or one with no frequent singletons, gives an empty
    /// result.
    ///
    /// # Errors
    ///
    /// - [`GroupsError::InvalidHyperparameter`] from [`Self::validate`].
    /// - Any scoring error, unmasked: a [`GroupsError::NumericDomain`] here
    ///   is an invariant breach and stops the search.
    pub fn fit(&self, data: &BinaryMatrix) -> Result<MiningResult> {
        self.validate()?;

        let singletons = self.frequent_singletons(data);
        info!("|F_1| = {}", singletons.len());
        let f1: Vec<ItemSet> = singletons.iter().map(|(set, _)| set.clone()).collect();

        let threshold = self.min_score.ln();
        let mut result = MiningResult {
            singletons,
            ..MiningResult::default()
        };

        let mut level = 1;
        let mut frontier = f1.clone();
        while !frontier.is_empty() && level < self.max_size {
            level += 1;

            let candidates = generate_candidates(&frontier, &f1);
            debug!(level, candidates = candidates.len(), "generated candidates");
            let scores = log_scores(data, &candidates, self.min_support)?;

            frontier = Vec::new();
            let n_candidates = candidates.len();
            for (items, score) in candidates.into_iter().zip(scores) {
                if score >= threshold {
                    frontier.push(items.clone());
                    result.groups.push(FrequentSet { items, score });
                }
            }

            info!("|F_{}| = {}", level, frontier.len());
            result.levels.push(LevelSummary {
                level,
                candidates: n_candidates,
                frequent: frontier.len(),
            });
        }

        Ok(result)
    }
}

impl Default for CooccurrenceMiner {
    fn default() -> Self {
        Self::new()
    }
}
