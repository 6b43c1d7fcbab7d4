//! Output formatting and persistence for aggregates.
//!
//! Supports two-column text files, JSON logging, and a CSV summary table.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::key::Numeric;
use crate::pipeline::types::{Aggregate, JoinedOutput};
use crate::stats::GroupStats;

/// Writes `<key> <mean>` lines in aggregate order.
pub fn write_means_to<K: Numeric>(out: &mut impl Write, agg: &Aggregate<K>) -> Result<()> {
    write_column(out, agg, |s| s.mean)
}

/// Writes `<key> <median>` lines in aggregate order.
pub fn write_medians_to<K: Numeric>(out: &mut impl Write, agg: &Aggregate<K>) -> Result<()> {
    write_column(out, agg, |s| s.median)
}

/// Writes `<throughput> <median_latency>` lines.
pub fn write_joined_to(out: &mut impl Write, joined: &JoinedOutput) -> Result<()> {
    for (throughput, latency) in joined {
        writeln!(out, "{throughput:.6} {latency:.6}")?;
    }
    Ok(())
}

fn write_column<K: Numeric>(
    out: &mut impl Write,
    agg: &Aggregate<K>,
    column: impl Fn(&GroupStats) -> f64,
) -> Result<()> {
    for (key, stats) in agg.iter() {
        writeln!(out, "{} {:.6}", key.format_key(), column(stats))?;
    }
    Ok(())
}

pub fn write_means<K: Numeric>(path: &Path, agg: &Aggregate<K>) -> Result<()> {
    write_file(path, agg.len(), |w| write_means_to(w, agg))
}

pub fn write_medians<K: Numeric>(path: &Path, agg: &Aggregate<K>) -> Result<()> {
    write_file(path, agg.len(), |w| write_medians_to(w, agg))
}

pub fn write_joined(path: &Path, joined: &JoinedOutput) -> Result<()> {
    write_file(path, joined.len(), |w| write_joined_to(w, joined))
}

/// Creates or truncates `path` and hands a buffered writer to `body`.
fn write_file(
    path: &Path,
    rows: usize,
    body: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    body(&mut writer).with_context(|| format!("writing {}", path.display()))?;
    writer.flush()?;

    info!(path = %path.display(), rows, "Wrote output");
    Ok(())
}

/// One row of the CSV summary table.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

fn summary_rows<K: Numeric>(agg: &Aggregate<K>) -> Vec<SummaryRow> {
    agg.iter()
        .map(|(key, stats)| SummaryRow {
            key: key.format_key(),
            count: stats.count,
            mean: stats.mean,
            median: stats.median,
        })
        .collect()
}

/// Logs the aggregate as pretty-printed JSON.
pub fn print_json<K: Numeric>(agg: &Aggregate<K>) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(&summary_rows(agg))?);
    Ok(())
}

/// Writes `key,count,mean,median` rows with a header to a CSV file.
pub fn write_summary_csv<K: Numeric>(path: &Path, agg: &Aggregate<K>) -> Result<()> {
    debug!(path = %path.display(), "Writing CSV summary");

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in summary_rows(agg) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = agg.len(), "Wrote CSV summary");
    Ok(())
}
