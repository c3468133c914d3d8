//! Shake Replay
//!
//! Runs a recorded accelerometer stream through the shake filter and reports
//! every shake it would have fired. Useful for tuning threshold and debounce
//! against captured device data.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use shake_sensing::replay::load_recording;
use shake_sensing::{MotionSampleSource, RecordedSource, ShakeConfig, ShakeDetector, TimedSample};

#[derive(Parser, Debug)]
#[command(name = "shake-replay")]
#[command(version)]
#[command(about = "Replay recorded accelerometer samples through the shake filter")]
struct Cli {
    /// Recording to replay (one `timestamp_ms,x,y,z` sample per line)
    #[arg(short, long)]
    input: PathBuf,

    /// TOML file overriding threshold, debounce_ms or gravity
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every accepted and debounced candidate
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ShakeConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ShakeConfig::default(),
    };
    info!(
        threshold = config.threshold,
        debounce_ms = config.debounce_ms,
        gravity = config.gravity,
        "using shake config"
    );

    let samples = load_recording(&cli.input)
        .with_context(|| format!("loading recording {}", cli.input.display()))?;
    for line in replay_lines(config, samples) {
        println!("{}", line);
    }
    Ok(())
}

/// Play `samples` through a started source and report each shake, followed
/// by a summary line.
fn replay_lines(config: ShakeConfig, samples: Vec<TimedSample>) -> Vec<String> {
    let mut source = RecordedSource::new(samples);
    let mut detector = ShakeDetector::with_config(config, || {});
    let mut lines = Vec::new();

    source.start();
    let mut delivered = 0;
    while let Some(timed) = source.poll() {
        delivered += 1;
        if detector.process_timed(&timed) {
            lines.push(format!(
                "shake at {} ms (force {:.2})",
                timed.timestamp_ms,
                detector.filter().net_force(&timed.sample)
            ));
        }
    }
    source.stop();

    lines.push(format!(
        "{} samples, {} shakes",
        delivered,
        detector.filter().accepted_count()
    ));
    lines
}
