//! Wingman - replay a MUD transcript and track the session it describes.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wingman_cli::{config, logging, render, replay};
use wingman_core::{ingest_queue, Regeneration, Session, SessionOptions, StreamIngestor};

use config::{Config, SnapshotFormat};
use logging::{LogConfig, LogFormat};
use replay::ReplaySource;

/// Wingman - experience, group, and room tracker for MUD sessions.
#[derive(Parser, Debug)]
#[command(name = "wingman")]
#[command(about = "Replay captured MUD output and track experience, group, and room state")]
#[command(version)]
struct Cli {
    /// Captured game output to replay ("-" for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the polling interval in milliseconds
    #[arg(long, value_name = "MS")]
    poll_interval: Option<u64>,

    /// Override the replay chunk size in bytes
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Keep pets and charmed creatures in the group
    #[arg(long)]
    include_creatures: bool,

    /// Hide a creature from the room view (repeatable)
    #[arg(long = "ignore", value_name = "CREATURE")]
    ignored: Vec<String>,

    /// Final snapshot format
    #[arg(long, value_name = "FORMAT")]
    format: Option<SnapshotFormat>,

    /// Enable verbose logging (session and room changes)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (every reassembled line)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "room=debug" or "ingest=trace")
    /// Can be specified multiple times. Targets are prefixed with "wingman::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(ms) = cli.poll_interval {
        config.poll_interval_ms = ms;
    }
    if let Some(size) = cli.chunk_size {
        config.chunk_size = size;
    }
    if cli.include_creatures {
        config.include_creatures_in_group = true;
    }
    if let Some(format) = cli.format {
        config.snapshot_format = format;
    }
    config.ignored_creatures.extend(cli.ignored);
    config.validate()?;

    tracing::info!(
        target: "wingman::startup",
        "Loaded configuration (poll: {}ms, chunk: {} bytes)",
        config.poll_interval_ms,
        config.chunk_size
    );

    let (tx, rx) = ingest_queue();
    let mut session = Session::with_options(
        rx,
        SessionOptions {
            include_creatures: config.include_creatures_in_group,
        },
    );

    let source = ReplaySource::from_arg(&cli.input);
    tracing::info!(target: "wingman::startup", "Replaying {:?}", source);
    let mut producer = replay::spawn_replay(source, config.chunk_size, StreamIngestor::new(tx)).await?;

    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));
    let mut shown_regeneration: Option<Regeneration> = None;

    let replay_result = loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick(&mut session, &config, &mut shown_regeneration);
            }
            result = &mut producer => {
                break result;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(target: "wingman::startup", "Interrupted, stopping replay");
                producer.abort();
                break Ok(Ok(Default::default()));
            }
        }
    };

    // Whatever the producer queued before finishing.
    tick(&mut session, &config, &mut shown_regeneration);

    let snapshot = render::visible_snapshot(&session, &config.ignored_creatures);
    match config.snapshot_format {
        SnapshotFormat::Text => print!("{}", render::render_text(&snapshot)),
        SnapshotFormat::Json => println!("{}", render::render_json(&snapshot)?),
    }

    replay_result??;
    Ok(())
}

/// One consumer tick: apply queued input and print what changed.
fn tick(session: &mut Session, config: &Config, shown_regeneration: &mut Option<Regeneration>) {
    for entry in session.drain_and_apply() {
        println!("{}", entry);
    }
    for signal in render::drain_signals(session) {
        println!("* {}", signal);
    }

    let regeneration = session.meditation_timer().map(|timer| timer.regeneration());
    if regeneration != *shown_regeneration {
        if let Some(timer) = session.meditation_timer() {
            println!("* {}", timer);
        }
        *shown_regeneration = regeneration;
    }

    if config.snapshot_format == SnapshotFormat::Text {
        if let Some(group) = session.take_group_if_changed() {
            println!("* Group now has {} member(s)", group.len());
        }
    }
}
