mod bytecode;
mod counters;
mod decode;
mod ingest;
mod ir;
mod metrics;
mod model;
mod opcodes;
mod report;
mod scan;
#[cfg(test)]
mod test_support;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::metrics::calculate_metrics;
use crate::report::{OutputFormat, write_report};
use crate::scan::scan_input;

/// CLI arguments for jarmetrics execution.
#[derive(Parser, Debug)]
#[command(
    name = "jarmetrics",
    about = "Inheritance, override, field and ABC complexity metrics for JVM class files and JAR files.",
    version
)]
struct Cli {
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    timing: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    run(cli)
}

fn init_logging(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(quiet)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// `--quiet` hides skipped-entry warnings unless `RUST_LOG` says otherwise.
fn default_log_level(quiet: bool) -> &'static str {
    if quiet { "error" } else { "warn" }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.exists() {
        anyhow::bail!("input not found: {}", cli.input.display());
    }

    let started_at = Instant::now();
    let scan = scan_input(&cli.input)?;
    let report = calculate_metrics(&scan.ingested.store, &scan.ingested.counters)
        .with_context(|| format!("failed to compute metrics for {}", cli.input.display()))?;

    let writer = output_writer(cli.output.as_deref())?;
    write_report(writer, &report, cli.format)?;

    if cli.timing && !cli.quiet {
        eprintln!(
            "timing: total_ms={} classes={} skipped={} records={}",
            started_at.elapsed().as_millis(),
            scan.class_count,
            scan.skipped_count,
            scan.ingested.store.len()
        );
    }

    Ok(())
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdout())),
        Some(path) => Ok(Box::new(
            File::create(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Ok(Box::new(io::stdout())),
    }
}
