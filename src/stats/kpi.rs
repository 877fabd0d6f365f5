use std::fmt;

use crate::data::filter::FilteredView;

/// Headline numbers for the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiSummary {
    pub total_employees: usize,
    pub attrition_count: usize,
    /// Percentage rounded to 2 decimals; `None` when there are no employees.
    pub attrition_rate: Option<f64>,
}

impl KpiSummary {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        let total_employees = view.len();
        let attrition_count = view.records().filter(|r| r.is_attrition()).count();
        KpiSummary {
            total_employees,
            attrition_count,
            attrition_rate: attrition_rate(attrition_count, total_employees),
        }
    }

    /// Rate formatted for display, `N/A` for an empty selection.
    pub fn rate_label(&self) -> String {
        match self.attrition_rate {
            Some(rate) => format!("{rate:.2}"),
            None => "N/A".to_string(),
        }
    }
}

impl fmt::Display for KpiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} employees, {} left, rate {}",
            self.total_employees,
            self.attrition_count,
            self.rate_label()
        )
    }
}

/// `count / total * 100` rounded half-up to 2 decimals.
///
/// Worked in integer hundredths of a percent so ties are exact:
/// 1 of 800 is 0.125% and rounds to 0.13.
pub fn attrition_rate(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let (count, total) = (count as u64, total as u64);
    let hundredths = (count * 20_000 + total) / (2 * total);
    Some(hundredths as f64 / 100.0)
}
