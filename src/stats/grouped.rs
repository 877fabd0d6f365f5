use std::collections::{BTreeMap, BTreeSet};

use crate::data::filter::FilteredView;
use crate::data::model::{CategoryValue, GroupField};

// ---------------------------------------------------------------------------
// GroupedCounts – attrition-positive rows per category
// ---------------------------------------------------------------------------

/// Count of `Attrition == "Yes"` rows per value of a grouping field.
///
/// Categories observed in the view but without any leaver are kept in
/// `observed` only: they never appear among the positive counts, while
/// [`GroupedCounts::get`] still answers 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCounts {
    observed: BTreeSet<CategoryValue>,
    positive: BTreeMap<CategoryValue, usize>,
}

impl GroupedCounts {
    /// Leaver count for `key`, 0 when the key has none or was never seen.
    pub fn get(&self, key: &CategoryValue) -> usize {
        self.positive.get(key).copied().unwrap_or(0)
    }

    /// Only the categories with at least one leaver.
    #[cfg(test)]
    pub fn positive(&self) -> &BTreeMap<CategoryValue, usize> {
        &self.positive
    }

    /// Every category present in the view, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryValue> {
        self.observed.iter()
    }

    /// `(category, count)` for every observed category, zeros included.
    pub fn rows(&self) -> Vec<(CategoryValue, usize)> {
        self.categories()
            .map(|k| (k.clone(), self.get(k)))
            .collect()
    }

    /// Sum across all categories.
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.positive.values().sum()
    }
}

/// Partition the view by `field` and count the leavers in each partition.
pub fn attrition_by(view: &FilteredView<'_>, field: GroupField) -> GroupedCounts {
    let mut observed = BTreeSet::new();
    let mut positive: BTreeMap<CategoryValue, usize> = BTreeMap::new();

    for record in view.records() {
        let key = field.value_of(record);
        if record.is_attrition() {
            *positive.entry(key.clone()).or_insert(0) += 1;
        }
        observed.insert(key);
    }

    GroupedCounts {
        observed,
        positive,
    }
}

/// Count every value of `field`, most frequent first (ties by value).
pub fn value_counts(view: &FilteredView<'_>, field: GroupField) -> Vec<(CategoryValue, usize)> {
    let mut counts: BTreeMap<CategoryValue, usize> = BTreeMap::new();
    for record in view.records() {
        *counts.entry(field.value_of(record)).or_insert(0) += 1;
    }
    let mut rows: Vec<(CategoryValue, usize)> = counts.into_iter().collect();
    // stable sort keeps value order among equal counts
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}
