//! Grouping, aggregation and join stages.
//!
//! Records are folded into per-key groups, reduced to mean and median, and
//! optionally paired with per-key throughput. Each stage takes the previous
//! stage's result by reference and returns a fresh value.

pub mod aggregate;
pub mod group;
pub mod join;
pub mod runner;
pub mod types;
pub mod utility;
