//! Line parser for `<key> <value>` record files.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::error::{AggregateError, ParseFailure};
use crate::key::Numeric;

/// One input line: a grouping key and the measured value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<K> {
    pub key: K,
    pub value: K,
}

/// Parses a single whitespace-separated record.
///
/// Only the first two fields are read; anything after them is ignored.
///
/// # Errors
///
/// Returns [`AggregateError::Parse`] if the line has fewer than two fields or
/// either field is not a number of type `K`.
pub fn parse_record<K: Numeric>(line: &str) -> Result<Record<K>, AggregateError> {
    let mut fields = line.split_whitespace();
    let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
        return Err(parse_error(line, ParseFailure::MissingField));
    };

    Ok(Record {
        key: parse_field(line, key)?,
        value: parse_field(line, value)?,
    })
}

fn parse_field<K: Numeric>(line: &str, token: &str) -> Result<K, AggregateError> {
    token
        .parse()
        .map_err(|_| parse_error(line, ParseFailure::InvalidNumber(token.to_string())))
}

fn parse_error(line: &str, reason: ParseFailure) -> AggregateError {
    AggregateError::Parse {
        line: None,
        content: line.to_string(),
        reason,
    }
}

/// Opens `path` and lazily yields one record per line.
///
/// The file stays open until the returned iterator is dropped.
pub fn read_records<K: Numeric>(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Record<K>>>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    debug!(path = %path.display(), "Reading records");

    let path = path.to_path_buf();
    Ok(BufReader::new(file)
        .lines()
        .enumerate()
        .map(move |(idx, line)| {
            let line = line.with_context(|| format!("reading {}", path.display()))?;
            parse_record(&line)
                .map_err(|e| e.at_line(idx + 1))
                .with_context(|| format!("parsing {}", path.display()))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_integer_record() {
        let record: Record<i64> = parse_record("1 10").unwrap();
        assert_eq!(record, Record { key: 1, value: 10 });
    }

    #[test]
    fn test_parse_float_record_with_mixed_whitespace() {
        let record: Record<f64> = parse_record("  2.5\t\t7e1 ").unwrap();
        assert_eq!(record.key, 2.5);
        assert_eq!(record.value, 70.0);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let record: Record<i64> = parse_record("3 4 5").unwrap();
        assert_eq!(record, Record { key: 3, value: 4 });
    }

    #[test]
    fn test_parse_missing_field() {
        let err = parse_record::<i64>("3").unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Parse {
                reason: ParseFailure::MissingField,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_record::<f64>("").is_err());
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = parse_record::<i64>("1 2.5").unwrap_err();
        assert_eq!(
            err,
            AggregateError::Parse {
                line: None,
                content: "1 2.5".to_string(),
                reason: ParseFailure::InvalidNumber("2.5".to_string()),
            }
        );
    }

    #[test]
    fn test_read_records_reports_line_number() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 10").unwrap();
        writeln!(file, "1 x").unwrap();

        let results: Vec<_> = read_records::<i64>(file.path()).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());

        let err = results[1].as_ref().unwrap_err();
        let parse = err.downcast_ref::<AggregateError>().unwrap();
        assert!(matches!(parse, AggregateError::Parse { line: Some(2), .. }));
    }

    #[test]
    fn test_read_records_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records::<f64>(&dir.path().join("absent.txt")).is_err());
    }
}
