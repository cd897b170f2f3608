use anyhow::{Context, Result};
use clap::Parser;
use indicator_tabulate::{
    run, AccelerationGaps, Mode, OutputFormat, RunOptions, SamplePeriod, TabulateConfig,
};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Turn a telemetry log into an aligned table written to `<input>.xyz`.
#[derive(Parser, Debug)]
#[command(name = "tabulate", version, about)]
struct Cli {
    /// Log file with one record per line.
    input: PathBuf,

    /// Interval between entries, in milliseconds.
    #[arg(required_unless_present = "coords")]
    sample_period_ms: Option<u64>,

    /// Write only the x/y/z coordinates of each entry.
    #[arg(long)]
    coords: bool,

    /// Table output format.
    #[arg(long, value_enum, conflicts_with = "coords")]
    format: Option<OutputFormat>,

    /// YAML file overriding the default columns, placeholder and suffix.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Handling of entries whose predecessor has no speed.
    #[arg(long, value_enum)]
    accel_gaps: Option<AccelerationGaps>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TabulateConfig::load(path)?,
        None => TabulateConfig::default(),
    };
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(gaps) = cli.accel_gaps {
        config.acceleration_gaps = gaps;
    }

    let mode = match (cli.coords, cli.sample_period_ms) {
        (true, _) => Mode::Coordinates,
        (false, Some(millis)) => Mode::Table(SamplePeriod::from_millis(millis)?),
        (false, None) => anyhow::bail!("a sample period is required unless --coords is given"),
    };

    let options = RunOptions {
        input: cli.input,
        mode,
        config,
    };
    let (report, _) = run(&options)
        .with_context(|| format!("failed to tabulate {}", options.input.display()))?;

    if report.missing_position > 0 {
        warn!(
            count = report.missing_position,
            "entries without a usable position were left out"
        );
    }
    Ok(())
}
