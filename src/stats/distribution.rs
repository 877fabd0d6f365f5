use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::{CategoryValue, GroupField};

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Summary statistics for one box of a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Values beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise `values`. Non-finite values are skipped; `None` if nothing is left.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = || sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        // q1..=q3 always holds data, so both whiskers exist
        let whisker_low = inside().next().unwrap_or(q1);
        let whisker_high = inside().last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Linear interpolation between closest ranks, position `(n - 1) * p`.
/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// `MonthlyIncome` box per `Attrition` value, ordered by that value.
pub fn income_by_attrition(view: &FilteredView<'_>) -> Vec<(CategoryValue, BoxStats)> {
    let mut groups: BTreeMap<CategoryValue, Vec<f64>> = BTreeMap::new();
    for record in view.records() {
        groups
            .entry(GroupField::Attrition.value_of(record))
            .or_default()
            .push(record.monthly_income);
    }
    groups
        .into_iter()
        .filter_map(|(key, values)| BoxStats::from_values(&values).map(|stats| (key, stats)))
        .collect()
}
