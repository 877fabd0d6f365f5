//! Aggregation stage: pure functions of a [`FilteredView`](crate::data::filter::FilteredView).
//!
//! * [`kpi`]          – totals and the attrition rate
//! * [`grouped`]      – leaver counts per category, value counts
//! * [`distribution`] – box-plot statistics for monthly income

pub mod distribution;
pub mod grouped;
pub mod kpi;
