//! Main entry point for the range-parser CLI application.
//!
//! This binary resolves the size of a resource (given literally, as a local
//! file, or as a remote HTTP URL) and prints the ranges a `Range` header
//! selects from it.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use range_parser::io::to_parser_size;
use range_parser::{Cli, HttpProbe, LocalFileProbe, ParseOutcome, RangeSet, SizeProbe, parse_range};

/// Exit status for a header without a `unit=` separator
const EXIT_MALFORMED: u8 = 2;
/// Exit status for a header where no range applies to the resource
const EXIT_UNSATISFIABLE: u8 = 3;

/// Application entry point.
///
/// Parses command-line arguments, resolves the resource size and prints the
/// parse outcome.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let size = resolve_size(&cli).await?;

    match parse_range(size, &cli.range, cli.parse_options()) {
        ParseOutcome::Satisfiable(set) => {
            let output = if cli.verbose {
                render_table(&set, cli.is_quiet())
            } else {
                render_plain(&set, cli.is_quiet())
            };

            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.as_bytes()).await?;
            stdout.flush().await?;

            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::Malformed => {
            if !cli.is_very_quiet() {
                eprintln!("Malformed Range header: {}", cli.range);
            }
            Ok(ExitCode::from(EXIT_MALFORMED))
        }
        ParseOutcome::Unsatisfiable => {
            if !cli.is_very_quiet() {
                eprintln!("Range not satisfiable for size {}: {}", size, cli.range);
            }
            Ok(ExitCode::from(EXIT_UNSATISFIABLE))
        }
    }
}

/// Install the log subscriber, filtered by `RUST_LOG` (default `warn`).
///
/// Logs go to stderr so that stdout only carries ranges.
fn init_tracing() {
    let env_filter = EnvFilter::builder().parse_lossy(
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or("warn".to_string()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Determine the resource size from the `RESOURCE` argument.
///
/// A plain integer is used as-is (negative sizes included). HTTP URLs are
/// probed with a `HEAD` request, anything else is treated as a local path.
async fn resolve_size(cli: &Cli) -> Result<i64> {
    if let Some(size) = cli.literal_size() {
        return Ok(size);
    }

    let probe: Box<dyn SizeProbe> = if cli.is_http_url() {
        Box::new(HttpProbe::new(
            cli.resource.clone(),
            Duration::from_secs(cli.timeout),
            cli.max_retry,
        )?)
    } else {
        Box::new(LocalFileProbe::new(Path::new(&cli.resource)))
    };

    let size = probe.content_length().await?;
    tracing::info!(resource = %probe.describe(), size, "resolved resource size");

    to_parser_size(size)
}

/// Render ranges one per line as `start-end`, preceded by the unit.
///
/// # Examples
///
/// ```ignore
/// // bytes
/// // 0-499
/// // 999-999
/// ```
fn render_plain(set: &RangeSet, quiet: bool) -> String {
    let mut out = String::new();

    if !quiet {
        out.push_str(&set.unit);
        out.push('\n');
    }

    for range in set {
        out.push_str(&format!("{}\n", range));
    }

    out
}

/// Render ranges as a table with a length column and a summary line.
fn render_table(set: &RangeSet, quiet: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:>20}  {:>20}  {:>20}\n", "Start", "End", "Length"));
    out.push_str(&format!("{}\n", "-".repeat(64)));

    for range in set {
        out.push_str(&format!(
            "{:>20}  {:>20}  {:>20}\n",
            range.start,
            range.end,
            range.len()
        ));
    }

    if !quiet {
        out.push_str(&format!("{}\n", "-".repeat(64)));
        out.push_str(&format!(
            "{:>20}  {} ranges, {}\n",
            set.total_len(),
            set.len(),
            format_total(set.total_len(), &set.unit)
        ));
    }

    out
}

/// Format a total length, in human-readable sizes when the unit is bytes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_total(500, "bytes"), "500 bytes");
/// assert_eq!(format_total(1536, "bytes"), "1.50 KB");
/// assert_eq!(format_total(6, "items"), "6 items");
/// ```
fn format_total(total: u64, unit: &str) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if unit != "bytes" {
        return format!("{} {}", total, unit);
    }

    if total >= GB {
        format!("{:.2} GB", total as f64 / GB as f64)
    } else if total >= MB {
        format!("{:.2} MB", total as f64 / MB as f64)
    } else if total >= KB {
        format!("{:.2} KB", total as f64 / KB as f64)
    } else {
        format!("{} bytes", total)
    }
}
