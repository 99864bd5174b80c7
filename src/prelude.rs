//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use ingredient_groups::prelude::*;
//! ```

pub use crate::config::{ExclusionList, MiningConfig};
pub use crate::data::{BinaryMatrix, RecipeLoader};
pub use crate::error::{GroupsError, Result};
pub use crate::mining::{CooccurrenceMiner, FrequentSet, ItemSet, MiningResult};
pub use crate::query::{GroupIndex, QueryOutcome};
pub use crate::store::IngredientGroups;
