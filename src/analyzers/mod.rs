//! Trip and weather analysis.
//!
//! Hourly weather is collapsed to days, trips are joined to either
//! granularity by start time, and each report groups and aggregates the
//! joined rows. Nothing here fails: empty inputs produce empty or
//! explicitly labeled results.

pub mod analyzer;
pub mod daily;
pub mod geometry;
pub mod join;
pub mod reports;
pub mod types;
pub mod utility;

#[cfg(test)]
pub(crate) mod testing;
