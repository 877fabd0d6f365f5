use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns every input file must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Department",
    "JobLevel",
    "Attrition",
    "OverTime",
    "WorkLifeBalance",
    "MonthlyIncome",
];

/// Value of the `Attrition` column for employees who left.
pub const ATTRITION_YES: &str = "Yes";

// ---------------------------------------------------------------------------
// CategoryValue – a single categorical cell
// ---------------------------------------------------------------------------

/// A categorical value used as a grouping key or selector option.
/// Ordinal columns stay numeric so `2 < 10` holds in every sorted list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryValue {
    Level(i64),
    Text(String),
}

impl PartialOrd for CategoryValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CategoryValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CategoryValue::*;
        match (self, other) {
            (Level(a), Level(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Level(_), Text(_)) => std::cmp::Ordering::Less,
            (Text(_), Level(_)) => std::cmp::Ordering::Greater,
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Level(i) => write!(f, "{i}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(s: &str) -> Self {
        CategoryValue::Text(s.to_string())
    }
}

impl From<i64> for CategoryValue {
    fn from(i: i64) -> Self {
        CategoryValue::Level(i)
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One employee row. Field names follow the source file headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "JobLevel")]
    pub job_level: i64,
    #[serde(rename = "Attrition")]
    pub attrition: String,
    #[serde(rename = "OverTime")]
    pub over_time: String,
    #[serde(rename = "WorkLifeBalance")]
    pub work_life_balance: i64,
    #[serde(rename = "MonthlyIncome")]
    pub monthly_income: f64,
}

impl EmployeeRecord {
    /// Whether this employee left the organisation.
    pub fn is_attrition(&self) -> bool {
        self.attrition == ATTRITION_YES
    }
}

// ---------------------------------------------------------------------------
// GroupField – categorical columns usable as keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupField {
    Department,
    JobLevel,
    Attrition,
    OverTime,
    WorkLifeBalance,
}

impl GroupField {
    /// Project a record onto this field.
    pub fn value_of(self, record: &EmployeeRecord) -> CategoryValue {
        match self {
            GroupField::Department => CategoryValue::Text(record.department.clone()),
            GroupField::JobLevel => CategoryValue::Level(record.job_level),
            GroupField::Attrition => CategoryValue::Text(record.attrition.clone()),
            GroupField::OverTime => CategoryValue::Text(record.over_time.clone()),
            GroupField::WorkLifeBalance => CategoryValue::Level(record.work_life_balance),
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded table. Never mutated after loading; filters borrow it.
#[derive(Debug, Clone, Default)]
pub struct EmployeeTable {
    records: Vec<EmployeeRecord>,
    /// Where the rows came from (file path or a test label).
    pub source: String,
}

impl EmployeeTable {
    pub fn new(records: Vec<EmployeeRecord>, source: impl Into<String>) -> Self {
        EmployeeTable {
            records,
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted set of distinct values of `field` across the whole table.
    pub fn unique_values(&self, field: GroupField) -> BTreeSet<CategoryValue> {
        self.records.iter().map(|r| field.value_of(r)).collect()
    }
}

#[cfg(test)]
pub(crate) fn record(
    department: &str,
    job_level: i64,
    attrition: &str,
    over_time: &str,
    work_life_balance: i64,
    monthly_income: f64,
) -> EmployeeRecord {
    EmployeeRecord {
        department: department.to_string(),
        job_level,
        attrition: attrition.to_string(),
        over_time: over_time.to_string(),
        work_life_balance,
        monthly_income,
    }
}
