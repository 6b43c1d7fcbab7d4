use anyhow::Result;
use tracing::debug;

use crate::key::Numeric;
use crate::parser::Record;
use crate::pipeline::types::Group;

/// Folds a stream of records into per-key value sequences.
///
/// Stops at the first failed record and returns its error.
pub fn group_records<K, I>(records: I) -> Result<Group<K>>
where
    K: Numeric,
    I: IntoIterator<Item = Result<Record<K>>>,
{
    let mut group = Group::new();
    let mut lines = 0usize;

    for record in records {
        let record = record?;
        group
            .entry_or_insert_with(record.key, Vec::new)
            .push(record.value);
        lines += 1;
    }

    debug!(lines, keys = group.len(), "Grouped records");
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AggregateError, ParseFailure};

    fn rec(key: i64, value: i64) -> Result<Record<i64>> {
        Ok(Record { key, value })
    }

    #[test]
    fn test_group_keeps_first_occurrence_order() {
        let group = group_records(vec![rec(2, 5), rec(1, 10), rec(2, 7), rec(1, 20)]).unwrap();

        let entries: Vec<_> = group.iter().map(|(k, v)| (k, v.clone())).collect();
        assert_eq!(entries, vec![(2, vec![5, 7]), (1, vec![10, 20])]);
    }

    #[test]
    fn test_group_keeps_duplicate_values() {
        let group = group_records(vec![rec(1, 3), rec(1, 3), rec(1, 3)]).unwrap();
        assert_eq!(group.get(1), Some(&vec![3, 3, 3]));
    }

    #[test]
    fn test_group_empty_input() {
        let group = group_records(Vec::<Result<Record<i64>>>::new()).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn test_group_stops_at_first_error() {
        let bad = Err(AggregateError::Parse {
            line: Some(2),
            content: "oops".to_string(),
            reason: ParseFailure::MissingField,
        }
        .into());

        let result = group_records(vec![rec(1, 1), bad, rec(2, 2)]);
        assert!(result.is_err());
    }
}
