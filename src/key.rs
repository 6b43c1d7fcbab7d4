//! Numeric column types accepted by the pipeline.
//!
//! Input files come in two flavours: integer records (`i64`) and
//! floating-point records (`f64`). Both columns of a record share the type.

use std::fmt::Debug;
use std::str::FromStr;

/// A number that can appear in either column of an input record.
pub trait Numeric: Copy + PartialEq + Debug + FromStr {
    /// Widens the number for mean/median arithmetic.
    fn to_f64(self) -> f64;

    /// Identity used to bucket equal keys together.
    fn identity(self) -> u64;

    /// Total order used when the join walks keys in ascending order.
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering;

    /// Renders the number as a key column in output files.
    fn format_key(self) -> String;
}

impl Numeric for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn identity(self) -> u64 {
        self as u64
    }

    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }

    fn format_key(self) -> String {
        self.to_string()
    }
}

impl Numeric for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn identity(self) -> u64 {
        // -0.0 == 0.0, so both must land in the same bucket
        if self == 0.0 { 0 } else { self.to_bits() }
    }

    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        f64::total_cmp(self, other)
    }

    fn format_key(self) -> String {
        format!("{self:.6}")
    }
}
