use super::model::{CategoryValue, EmployeeRecord, EmployeeTable, GroupField};

/// Selector label meaning "no constraint on this field".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter selection: two independent equality predicates
// ---------------------------------------------------------------------------

/// Active sidebar selection. `None` is the "All" entry and passes every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub department: Option<String>,
    pub job_level: Option<i64>,
}

impl FilterSelection {
    /// A record passes when it satisfies both constraints (logical AND).
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let department_ok = self
            .department
            .as_deref()
            .map_or(true, |d| record.department == d);
        let level_ok = self.job_level.map_or(true, |j| record.job_level == j);
        department_ok && level_ok
    }

    pub fn is_unconstrained(&self) -> bool {
        self.department.is_none() && self.job_level.is_none()
    }

    /// Drop constraints naming values the options no longer offer.
    pub fn retain_valid(&mut self, options: &FilterOptions) {
        if let Some(d) = &self.department {
            if !options.departments.contains(d) {
                log::debug!("Department '{d}' not in dataset, resetting to {ALL}");
                self.department = None;
            }
        }
        if let Some(j) = self.job_level {
            if !options.job_levels.contains(&j) {
                log::debug!("Job level {j} not in dataset, resetting to {ALL}");
                self.job_level = None;
            }
        }
    }

    /// Human-readable summary, e.g. `Department = Sales, JobLevel = All`.
    pub fn describe(&self) -> String {
        let department = self.department.as_deref().unwrap_or(ALL);
        let level = self
            .job_level
            .map(|j| j.to_string())
            .unwrap_or_else(|| ALL.to_string());
        format!("Department = {department}, JobLevel = {level}")
    }
}

/// Return indices of records that pass the selection, in source order.
pub fn filtered_indices(table: &EmployeeTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Apply a selection, producing a view over the untouched table.
pub fn apply<'a>(table: &'a EmployeeTable, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView {
        table,
        indices: filtered_indices(table, selection),
    }
}

// ---------------------------------------------------------------------------
// FilteredView – logical subset of a table
// ---------------------------------------------------------------------------

/// The rows of `table` listed in `indices`.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a EmployeeTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row.
    #[cfg(test)]
    pub fn all(table: &'a EmployeeTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a EmployeeRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// Values offered by the two selectors, taken from the unfiltered table so
/// neither list changes when the other filter does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub job_levels: Vec<i64>,
}

impl FilterOptions {
    pub fn from_table(table: &EmployeeTable) -> Self {
        let departments = table
            .unique_values(GroupField::Department)
            .into_iter()
            .filter_map(|v| match v {
                CategoryValue::Text(s) => Some(s),
                CategoryValue::Level(_) => None,
            })
            .collect();
        let job_levels = table
            .unique_values(GroupField::JobLevel)
            .into_iter()
            .filter_map(|v| match v {
                CategoryValue::Level(l) => Some(l),
                CategoryValue::Text(_) => None,
            })
            .collect();
        FilterOptions {
            departments,
            job_levels,
        }
    }

    /// Department selector entries as `(constraint, label)`, "All" first.
    pub fn department_entries(&self) -> Vec<(Option<String>, String)> {
        std::iter::once((None, ALL.to_string()))
            .chain(self.departments.iter().map(|d| (Some(d.clone()), d.clone())))
            .collect()
    }

    /// Job level selector entries as `(constraint, label)`, "All" first.
    pub fn job_level_entries(&self) -> Vec<(Option<i64>, String)> {
        std::iter::once((None, ALL.to_string()))
            .chain(self.job_levels.iter().map(|&j| (Some(j), j.to_string())))
            .collect()
    }
}
