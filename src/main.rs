//! CLI entry point for the latency grouper.
//!
//! Groups `<key> <value>` records by key and writes per-key means and
//! medians, optionally joining the medians against a throughput file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use latency_grouper::{
    key::Numeric,
    output::{print_json, write_summary_csv},
    pipeline::runner::{summarize, summarize_and_join},
    pipeline::types::Aggregate,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "latency_grouper")]
#[command(about = "Per-key mean/median summaries of two-column numeric files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Also write a key,count,mean,median CSV table to this path
    #[arg(long, global = true, value_name = "PATH")]
    summary_csv: Option<PathBuf>,

    /// Log the aggregate as pretty JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean per key of an integer-keyed file
    Mean {
        /// `<key> <value>` file with integer columns
        input: PathBuf,

        /// Where to write `<key> <mean>` lines (stdout if omitted)
        mean_out: Option<PathBuf>,
    },
    /// Mean and median per key of a float-keyed file
    Summarize {
        /// `<key> <value>` file with floating-point columns
        input: PathBuf,

        /// Where to write `<key> <mean>` lines
        mean_out: PathBuf,

        /// Where to write `<key> <median>` lines
        median_out: Option<PathBuf>,
    },
    /// Summarize latencies, then pair median latency with throughput by key
    Join {
        /// `<key> <latency>` file
        latency_in: PathBuf,

        /// Where to write `<key> <mean>` lines
        mean_out: PathBuf,

        /// Where to write `<key> <median>` lines
        median_out: PathBuf,

        /// `<key> <throughput>` file
        throughput_in: PathBuf,

        /// Where to write `<throughput> <median_latency>` lines
        joined_out: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Mean { input, mean_out } => {
            let agg = summarize::<i64>(input, mean_out.as_deref(), None)?;
            export(&cli, &agg)?;
        }
        Commands::Summarize {
            input,
            mean_out,
            median_out,
        } => {
            let agg = summarize::<f64>(input, Some(mean_out.as_path()), median_out.as_deref())?;
            export(&cli, &agg)?;
        }
        Commands::Join {
            latency_in,
            mean_out,
            median_out,
            throughput_in,
            joined_out,
        } => {
            let (agg, _) =
                summarize_and_join(latency_in, mean_out, median_out, throughput_in, joined_out)?;
            export(&cli, &agg)?;
        }
    }

    Ok(())
}

/// Writes the optional JSON log and CSV summary requested on the command line.
fn export<K: Numeric>(cli: &Cli, agg: &Aggregate<K>) -> Result<()> {
    if cli.json {
        print_json(agg)?;
    }
    if let Some(path) = &cli.summary_csv {
        write_summary_csv(path, agg)?;
    }
    Ok(())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when `LOG_FILE_PATH` is set.
///
/// The returned guard flushes the file writer on drop and must outlive `main`'s work.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_path = Path::new(&log_file_path);
            let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
            let log_file_name = log_path
                .file_name()
                .unwrap_or(OsStr::new("latency_grouper.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    debug!(json_log = guard.is_some(), "Logging initialised");
    Ok(guard)
}
