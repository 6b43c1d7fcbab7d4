use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::error::AggregateError;
use crate::key::Numeric;
use crate::parser::read_records;
use crate::pipeline::types::{Aggregate, JoinedOutput, ThroughputMap};

/// Loads a `<key> <throughput>` file. Later lines overwrite earlier ones.
pub fn read_throughput<K: Numeric>(path: &Path) -> Result<ThroughputMap<K>> {
    let mut map = ThroughputMap::new();
    for record in read_records::<K>(path)? {
        let record = record?;
        map.insert(record.key, record.value);
    }

    debug!(path = %path.display(), keys = map.len(), "Loaded throughput");
    Ok(map)
}

/// Pairs each throughput with the median latency of the same key, in ascending key order.
///
/// # Errors
///
/// Returns [`AggregateError::KeyNotFound`] for a throughput key with no latency group.
pub fn join<K: Numeric>(
    throughput: &ThroughputMap<K>,
    latency: &Aggregate<K>,
) -> Result<JoinedOutput, AggregateError> {
    throughput
        .sorted_by_key()
        .into_iter()
        .map(|(key, tput)| {
            let stats = latency.get(key).ok_or_else(|| AggregateError::KeyNotFound {
                key: key.format_key(),
            })?;
            Ok::<_, AggregateError>((tput.to_f64(), stats.median))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GroupStats;

    fn latency(medians: &[(f64, f64)]) -> Aggregate<f64> {
        let mut agg = Aggregate::new();
        for &(k, m) in medians {
            agg.insert(
                k,
                GroupStats {
                    count: 1,
                    mean: m,
                    median: m,
                },
            );
        }
        agg
    }

    #[test]
    fn test_join_orders_by_key() {
        let mut tput = ThroughputMap::new();
        tput.insert(2.0, 100.0);
        tput.insert(1.0, 50.0);

        let joined = join(&tput, &latency(&[(1.0, 15.0), (2.0, 5.0)])).unwrap();
        assert_eq!(joined, vec![(50.0, 15.0), (100.0, 5.0)]);
    }

    #[test]
    fn test_join_ignores_latency_only_keys() {
        let mut tput = ThroughputMap::new();
        tput.insert(3.0, 1.0);

        let joined = join(&tput, &latency(&[(3.0, 2.0), (4.0, 8.0)])).unwrap();
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_join_missing_key() {
        let mut tput = ThroughputMap::new();
        tput.insert(1.0, 50.0);
        tput.insert(7.0, 70.0);

        let err = join(&tput, &latency(&[(1.0, 15.0)])).unwrap_err();
        assert_eq!(
            err,
            AggregateError::KeyNotFound {
                key: "7.000000".to_string()
            }
        );
    }

    #[test]
    fn test_read_throughput_last_entry_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tput.txt");
        std::fs::write(&path, "1 10\n2 20\n1 30\n").unwrap();

        let map = read_throughput::<f64>(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1.0), Some(&30.0));
    }
}
