mod args;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use relative_date::{
    classify, from_now, relative_date, schedule, Bucket, Elapsed, FormatOptions, Instant,
    LabelOverrides, Labels, Zone,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{parse_date_like, Cli, Command};

/// Output of `relday classify`.
#[derive(Debug, Serialize)]
struct ClassifyOutput {
    target: String,
    now: String,
    bucket: Bucket,
    label: String,
    schedule: String,
    from_now: String,
    elapsed: Elapsed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let zone = Zone::parse(cli.tz.as_deref())?;
    let now = match &cli.now {
        Some(raw) => parse_date_like(raw)
            .normalize(&zone)
            .with_context(|| format!("invalid --now value '{raw}'"))?,
        None => Instant::now(),
    };
    let options = build_options(&cli, zone, now)?;
    let target = parse_date_like(cli.command.target());
    debug!(?target, zone = ?options.zone, "formatting");

    let output = match &cli.command {
        Command::Relative { .. } => relative_date(target, &options)?,
        Command::FromNow { .. } => from_now(target, &options)?,
        Command::Schedule { .. } => schedule(target, &options)?,
        Command::Classify { .. } => {
            let target_instant = target.normalize(&options.zone)?;
            let classification = classify(target_instant, &options)?;
            let out = ClassifyOutput {
                target: target_instant.utc().to_rfc3339(),
                now: now.utc().to_rfc3339(),
                bucket: classification.bucket,
                label: classification.render(&options.labels)?,
                schedule: schedule(target_instant, &options)?,
                from_now: from_now(target_instant, &options)?,
                elapsed: Elapsed::between(&target_instant, &now),
            };
            serde_json::to_string_pretty(&out)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Assemble per-call options. "Now" is pinned so every value printed by one
/// invocation derives from the same snapshot.
fn build_options(cli: &Cli, zone: Zone, now: Instant) -> Result<FormatOptions> {
    let labels = match &cli.labels {
        Some(path) => load_labels(path)?,
        None => Labels::default(),
    };

    Ok(FormatOptions::new()
        .with_now(now)
        .with_zone(zone)
        .with_labels(labels)
        .with_week_start(cli.week_start.into()))
}

fn load_labels(path: &Path) -> Result<Labels> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read labels file {}", path.display()))?;
    let overrides = LabelOverrides::from_json(&json)
        .with_context(|| format!("failed to parse labels file {}", path.display()))?;
    Ok(Labels::with_overrides(&overrides))
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("relday=debug,relative_date=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
