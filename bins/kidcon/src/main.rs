use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;

use kidcon_capture::{CaptureConfig, Clock, LocalFileStore, LogBucketAppender, SystemClock};
use kidcon_ingest::LineParser;
use kidcon_logging::LogConfig;
use kidcon_monitor::{DeviceCounterReporter, DeviceRegistry, MemRegistry, TracingSink};
use kidcon_store::{SampleStore, StoredSample};
use kidcon_types::{Status, StatusCode};

/// Captures kid-control counter telemetry from router log lines.
#[derive(Parser, Debug)]
#[command(name = "kidcon", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database where parsed counter samples are stored
    #[arg(long, default_value = "kidcon.db")]
    sqlite_db: PathBuf,

    /// Print stored samples for the given device and exit
    #[arg(long, value_name = "DEVICE")]
    print: Option<String>,

    /// Directory for hour-bucketed raw-line capture (overrides config)
    #[arg(long)]
    bucket_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    capture: CaptureConfig,

    #[serde(default)]
    log: LogConfig,
}

fn load_config(path: &Path) -> kidcon_types::Result<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Status::with_message(
            StatusCode::IO_ERROR,
            format!("read {}: {}", path.display(), e),
        )
    })?;
    toml::from_str(&text).map_err(|e| {
        Status::with_message(
            StatusCode::CONFIG_PARSE_ERROR,
            format!("parse {}: {}", path.display(), e),
        )
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let _guard = kidcon_logging::init_logging(&config.log);

    let store = SampleStore::open(&args.sqlite_db)?;

    if let Some(name) = &args.print {
        for row in store.rows_for(name)? {
            println!("{} {} {}", row.timestamp, row.bytes_up, row.bytes_down);
        }
        return Ok(());
    }

    tracing::info!("started");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registry = Arc::new(MemRegistry::new());

    let bucket_dir = args.bucket_dir.or(config.capture.bucket_dir);
    let appender = bucket_dir.map(|dir| {
        LogBucketAppender::new(dir, clock.clone(), Arc::new(LocalFileStore))
    });

    let parser = LineParser::new();
    let mut accepted: u64 = 0;
    let mut skipped: u64 = 0;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let now = clock.now();

        match parser.parse_line(&line, now.naive_local()) {
            Ok(Some(sample)) => {
                store.upsert(&StoredSample {
                    timestamp: sample.timestamp,
                    name: sample.device.clone(),
                    bytes_up: sample.bytes_up,
                    bytes_down: sample.bytes_down,
                })?;
                registry.observe(
                    &sample.device,
                    sample.bytes_up.round() as u64,
                    sample.bytes_down.round() as u64,
                );
                if let Some(appender) = &appender {
                    appender.append(&format!("{}\n", line))?;
                }
                accepted += 1;
            }
            Ok(None) => {
                skipped += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed counter line");
            }
        }
    }

    if !config.capture.devices.is_empty() {
        let registry: Arc<dyn DeviceRegistry> = registry.clone();
        let reporter = DeviceCounterReporter::new(registry, clock);
        let summary = reporter.run_cycle(&config.capture.devices, &TracingSink)?;
        tracing::info!(reported = summary.reported, "counter cycle complete");
    }

    tracing::info!(accepted, skipped, "stopped");
    Ok(())
}
