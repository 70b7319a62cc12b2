//! Summary aggregation between task time entries and canonical summaries
//!
//! A task's time entries (TIM) carry totals as data log values (DLV). On import
//! they become stamped metered value sets of a canonical [`Summary`]; on export
//! each stamped set becomes one time entry again.
//!
//! Import is all-or-nothing: one data log value that cannot be decoded
//! discards the whole batch, so a summary is never partially populated.
//!
//! [`Summary`]: crate::app::models::canonical::Summary

pub mod export;
pub mod import;

#[cfg(test)]
pub mod tests;

pub use export::export_summary;
pub use import::{import_summary_data, is_summary_candidate};
