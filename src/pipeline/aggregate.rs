use tracing::debug;

use crate::error::AggregateError;
use crate::key::Numeric;
use crate::pipeline::types::{Aggregate, Group};
use crate::stats::GroupStats;

/// Reduces every group to its count, mean and median.
///
/// The result keeps the group's key order.
pub fn aggregate<K: Numeric>(group: &Group<K>) -> Result<Aggregate<K>, AggregateError> {
    let mut out = Aggregate::new();

    for (key, values) in group.iter() {
        let values: Vec<f64> = values.iter().map(|v| v.to_f64()).collect();
        let stats = GroupStats::from_values(&values).ok_or_else(|| AggregateError::EmptyGroup {
            key: key.format_key(),
        })?;
        out.insert(key, stats);
    }

    debug!(keys = out.len(), "Aggregated groups");
    Ok(out)
}
