//! Candidate generation for the next level.

use super::ItemSet;

/// Builds the level-k candidates from `F_{k-1}` and the frequent singletons.
///
/// Each candidate is `f ∪ {s}` where `s` is larger than every item of `f`.
/// A k-set therefore has exactly one parent pair (its largest item plus the
/// rest), so no candidate is produced twice and no seen-set is kept.
///
/// No support or score check happens here. Output is grouped by singleton,
/// then by position in `prev`.
///
/// # Examples
///
/// ```
/// use ingredient_groups::mining::{generate_candidates, ItemSet};
///
/// let f1: Vec<ItemSet> = (0..3).map(ItemSet::singleton).collect();
/// let c2 = generate_candidates(&f1, &f1);
///
/// assert_eq!(
///     c2,
///     vec![
///         ItemSet::from_items([0, 1]),
///         ItemSet::from_items([0, 2]),
///         ItemSet::from_items([1, 2]),
///     ]
/// );
/// ```
#[must_use]
pub fn generate_candidates(prev: &[ItemSet], singletons: &[ItemSet]) -> Vec<ItemSet> {
    let mut candidates = Vec::new();

    for singleton in singletons {
        let Some(item) = singleton.max_item() else {
            continue;
        };
        candidates.extend(prev.iter().filter_map(|set| set.extended_with(item)));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn singletons(items: &[usize]) -> Vec<ItemSet> {
        items.iter().copied().map(ItemSet::singleton).collect()
    }

    #[test]
    fn test_empty_inputs_give_no_candidates() {
        let f1 = singletons(&[0, 1, 2]);
        assert!(generate_candidates(&[], &f1).is_empty());
        assert!(generate_candidates(&f1, &[]).is_empty());
    }

    #[test]
    fn test_level_two_is_all_pairs_once() {
        let f1 = singletons(&[1, 4, 6, 9]);
        let c2 = generate_candidates(&f1, &f1);

        assert_eq!(c2.len(), 6);
        let unique: HashSet<_> = c2.iter().cloned().collect();
        assert_eq!(unique.len(), 6);
        assert!(c2.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_level_three_from_subset_of_pairs() {
        // {0,1} and {1,2} survived level 2; {0,2} did not
        let f1 = singletons(&[0, 1, 2, 3]);
        let f2 = vec![ItemSet::from_items([0, 1]), ItemSet::from_items([1, 2])];
        let c3 = generate_candidates(&f2, &f1);

        // {0,1,2} is built from {0,1} + 2 even though {0,2} is not frequent
        assert_eq!(
            c3,
            vec![
                ItemSet::from_items([0, 1, 2]),
                ItemSet::from_items([0, 1, 3]),
                ItemSet::from_items([1, 2, 3]),
            ]
        );
    }

    #[test]
    fn test_singleton_not_larger_is_skipped() {
        let f1 = singletons(&[0, 5]);
        let prev = vec![ItemSet::from_items([3, 8])];
        assert!(generate_candidates(&prev, &f1).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let f1 = singletons(&[0, 2, 3, 7]);
        let f2 = generate_candidates(&f1, &f1);
        assert_eq!(
            generate_candidates(&f2, &f1),
            generate_candidates(&f2, &f1)
        );
    }
}
