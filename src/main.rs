//! CLI entry point for the trip log analyzer.
//!
//! Reads each exported travel-log file named on the command line, extracts
//! speed samples and trip metadata, computes per-trip summary statistics,
//! and prints one report block per file sorted by recorded start time.

use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use trip_log_analyzer::extract::scan_log;
use trip_log_analyzer::report::{self, TripReport};
use trip_log_analyzer::stats::{AnalysisConfig, TripStats};

#[derive(Parser)]
#[command(name = "trip_log_analyzer")]
#[command(about = "A tool to summarize exported travel-log files", long_about = None)]
struct Cli {
    /// Travel-log files to analyze, one trip per file
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/trip_log_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_log_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = AnalysisConfig::default();

    let mut reports = Vec::with_capacity(cli.paths.len());

    for path in &cli.paths {
        // The handle lives only as long as this file's extraction, so open
        // handles never accumulate across the batch.
        let log = {
            let file =
                File::open(path).with_context(|| format!("read file: {}", path.display()))?;
            scan_log(BufReader::new(file))
                .with_context(|| format!("read file: {}", path.display()))?
        };

        match TripStats::compute(&log.samples, &config) {
            Ok(stats) => reports.push(TripReport {
                path: path.clone(),
                destination: log.destination,
                stats,
                metadata: log.metadata,
            }),
            Err(e) => error!(path = %path.display(), error = %e, "skipping file"),
        }
    }

    report::sort_by_start_time(&mut reports);
    report::render(&mut std::io::stdout().lock(), &reports)?;

    info!(
        analyzed = reports.len(),
        requested = cli.paths.len(),
        "run complete"
    );

    Ok(())
}
