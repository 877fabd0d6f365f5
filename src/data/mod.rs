/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, check required columns → EmployeeTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ EmployeeTable │  Vec<EmployeeRecord>, immutable after load
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Department / JobLevel equality → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
