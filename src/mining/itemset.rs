//! Item sets as sorted, duplicate-free item id lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of item ids.
///
/// Always sorted ascending with no repeats, so derived equality and hashing
/// are set equality and [`ItemSet::max_item`] is the last element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct ItemSet(Vec<usize>);

impl ItemSet {
    /// A one-item set.
    #[must_use]
    pub fn singleton(item: usize) -> Self {
        Self(vec![item])
    }

    /// Builds a set from any items; order and repeats are normalised away.
    pub fn from_items<I: IntoIterator<Item = usize>>(items: I) -> Self {
        let mut items: Vec<usize> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    /// Number of items (k).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest item id, `None` when empty.
    #[must_use]
    pub fn max_item(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// True if `item` is a member.
    #[must_use]
    pub fn contains(&self, item: usize) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Items in ascending order.
    #[must_use]
    pub fn items(&self) -> &[usize] {
        &self.0
    }

    /// Iterates items in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// `self ∪ {item}` for an item larger than every member.
    ///
    /// Returns `None` if `item` is not strictly larger than [`Self::max_item`].
    #[must_use]
    pub fn extended_with(&self, item: usize) -> Option<Self> {
        if self.max_item().is_some_and(|max| item <= max) {
            return None;
        }
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.extend_from_slice(&self.0);
        items.push(item);
        Some(Self(items))
    }
}

impl TryFrom<Vec<usize>> for ItemSet {
    type Error = String;

    fn try_from(items: Vec<usize>) -> Result<Self, Self::Error> {
        if items.windows(2).all(|w| w[0] < w[1]) {
            Ok(Self(items))
        } else {
            Err(format!("item set {items:?} is not strictly ascending"))
        }
    }
}

impl From<ItemSet> for Vec<usize> {
    fn from(set: ItemSet) -> Self {
        set.0
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items_normalises() {
        let set = ItemSet::from_items([5, 1, 3, 1]);
        assert_eq!(set.items(), &[1, 3, 5]);
        assert_eq!(set, ItemSet::from_items([3, 5, 1]));
        assert_eq!(set.max_item(), Some(5));
        assert!(set.contains(3));
        assert!(!set.contains(2));
    }

    #[test]
    fn test_extended_with_requires_larger_item() {
        let set = ItemSet::from_items([2, 4]);
        assert_eq!(set.extended_with(7), Some(ItemSet::from_items([2, 4, 7])));
        assert_eq!(set.extended_with(4), None);
        assert_eq!(set.extended_with(3), None);
        assert_eq!(
            ItemSet::from_items([]).extended_with(0),
            Some(ItemSet::singleton(0))
        );
    }

    #[test]
    fn test_try_from_rejects_unsorted() {
        assert!(ItemSet::try_from(vec![1, 2, 9]).is_ok());
        assert!(ItemSet::try_from(vec![2, 1]).is_err());
        assert!(ItemSet::try_from(vec![1, 1]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemSet::from_items([3, 0]).to_string(), "{0, 3}");
    }
}
