use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use crate::key::Numeric;
use crate::output::{write_joined, write_means, write_means_to, write_medians};
use crate::parser::read_records;
use crate::pipeline::aggregate::aggregate;
use crate::pipeline::group::group_records;
use crate::pipeline::join::{join, read_throughput};
use crate::pipeline::types::{Aggregate, JoinedOutput};

/// Reads and aggregates one record file.
///
/// The input file is fully consumed and closed before this returns.
pub fn load_aggregate<K: Numeric>(input: &Path) -> Result<Aggregate<K>> {
    let group = group_records(read_records::<K>(input)?)?;
    Ok(aggregate(&group)?)
}

/// Aggregates `input` and writes means and, optionally, medians.
///
/// With no `mean_out`, the means are printed to stdout instead.
#[tracing::instrument(fields(input = %input.display()), skip_all)]
pub fn summarize<K: Numeric>(
    input: &Path,
    mean_out: Option<&Path>,
    median_out: Option<&Path>,
) -> Result<Aggregate<K>> {
    let Some(mean_out) = mean_out else {
        let stdout = io::stdout();
        return summarize_to::<K>(input, &mut stdout.lock(), median_out);
    };

    let agg = load_aggregate::<K>(input)?;
    write_means(mean_out, &agg)?;
    finish_summary(agg, median_out)
}

/// Like [`summarize`], but writes the `<key> <mean>` lines to `out`.
pub fn summarize_to<K: Numeric>(
    input: &Path,
    out: &mut impl Write,
    median_out: Option<&Path>,
) -> Result<Aggregate<K>> {
    let agg = load_aggregate::<K>(input)?;
    write_means_to(out, &agg)?;
    out.flush()?;
    finish_summary(agg, median_out)
}

fn finish_summary<K: Numeric>(
    agg: Aggregate<K>,
    median_out: Option<&Path>,
) -> Result<Aggregate<K>> {
    if let Some(path) = median_out {
        write_medians(path, &agg)?;
    }

    info!(keys = agg.len(), "Summary complete");
    Ok(agg)
}

/// Runs the full latency summary, then joins medians against a throughput file.
#[tracing::instrument(
    fields(latency_in = %latency_in.display(), throughput_in = %throughput_in.display()),
    skip_all
)]
pub fn summarize_and_join(
    latency_in: &Path,
    mean_out: &Path,
    median_out: &Path,
    throughput_in: &Path,
    joined_out: &Path,
) -> Result<(Aggregate<f64>, JoinedOutput)> {
    let agg = summarize::<f64>(latency_in, Some(mean_out), Some(median_out))?;

    let throughput = read_throughput::<f64>(throughput_in)?;
    let joined = join(&throughput, &agg)?;
    write_joined(joined_out, &joined)?;

    info!(rows = joined.len(), "Join complete");
    Ok((agg, joined))
}
