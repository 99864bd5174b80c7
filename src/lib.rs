//! Ingredient groups: level-wise mining of over-represented item sets.
//!
//! Finds groups of binary tags (ingredients) that appear together in records
//! (recipes) far more often than independence predicts. The search is
//! Apriori-shaped, but it keeps co-occurring subsets of any size instead of
//! learning directional rules.
//!
//! # Quick Start
//!
//! ```
//! use ingredient_groups::prelude::*;
//!
//! let data = BinaryMatrix::from_transactions(
//!     vec!["basil".into(), "tomato".into(), "cumin".into()],
//!     &[vec![0, 1], vec![0, 1], vec![0, 1], vec![2], vec![2], vec![0]],
//! )
//! .unwrap();
//!
//! let result = CooccurrenceMiner::new()
//!     .with_min_support(2)
//!     .with_min_score(1.2)
//!     .fit(&data)
//!     .unwrap();
//!
//! let groups = IngredientGroups::from_result(&result, &data).unwrap();
//! let index = GroupIndex::new(&groups);
//! println!("{}", index.lookup("basil"));
//! ```
//!
//! # Modules
//!
//! - [`data`]: Binary record x item matrix and CSV ingestion
//! - [`mining`]: Candidate generation, log-space scoring, level-wise search
//! - [`store`]: Saving and loading mined groups
//! - [`query`]: Ingredient lookup and the interactive search loop
//! - [`config`]: Thresholds and column exclusions
//! - [`error`]: Error types

pub mod config;
pub mod data;
pub mod error;
pub mod mining;
pub mod prelude;
pub mod query;
pub mod store;

pub use error::{GroupsError, Result};
