//! Analysis modules.
//!
//! The aggregator computes every statistic of the demographic report.

pub mod aggregator;

pub use aggregator::calculate_demographic_data;
