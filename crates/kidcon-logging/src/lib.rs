//! Tracing setup for the kidcon tools: console output plus optional
//! rotating file output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for log files. If None, no file logging.
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(default = "default_prefix")]
    pub file_prefix: String,

    /// Log rotation: "hourly", "daily", "never".
    #[serde(default = "default_rotation")]
    pub rotation: String,

    /// Whether to output JSON format.
    #[serde(default)]
    pub json_format: bool,

    /// Whether to also output to console (stderr).
    #[serde(default = "default_true")]
    pub console_output: bool,
}

fn default_level() -> String {
    "info".into()
}

fn default_prefix() -> String {
    "kidcon".into()
}

fn default_rotation() -> String {
    "hourly".into()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
            log_dir: None,
            file_prefix: default_prefix(),
            rotation: default_rotation(),
            json_format: false,
            console_output: true,
        }
    }
}

type BoxedLayer<S> = Box<dyn tracing_subscriber::Layer<S> + Send + Sync>;

/// Initialize the logging system. Should be called once at program startup.
/// Returns a guard that must be held alive for the duration of the program
/// (for the non-blocking file writer).
pub fn init_logging(config: &LogConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer<_>> = Vec::new();
    let mut guard = None;

    if config.console_output {
        let layer = fmt::layer().with_writer(std::io::stderr);
        layers.push(if config.json_format {
            Box::new(layer.json())
        } else {
            Box::new(layer)
        });
    }

    if let Some(ref log_dir) = config.log_dir {
        let rotation = match config.rotation.as_str() {
            "daily" => rolling::Rotation::DAILY,
            "never" => rolling::Rotation::NEVER,
            // default to hourly
            _ => rolling::Rotation::HOURLY,
        };

        let file_appender = rolling::RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(config.file_prefix.as_str())
            .filename_suffix("log")
            .build(log_dir)
            .expect("failed to create rolling file appender");

        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
        layers.push(if config.json_format {
            Box::new(layer.json())
        } else {
            Box::new(layer)
        });
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.log_dir.is_none());
        assert_eq!(config.file_prefix, "kidcon");
        assert_eq!(config.rotation, "hourly");
        assert!(!config.json_format);
        assert!(config.console_output);
    }

    #[test]
    fn test_parse_from_toml() {
        let config: LogConfig = toml::from_str(
            r#"
            level = "debug"
            log_dir = "/var/log/kidcon"
            rotation = "daily"
            "#,
        )
        .unwrap();

        assert_eq!(config.level, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/kidcon")));
        assert_eq!(config.rotation, "daily");
        // Unspecified fields fall back to defaults.
        assert_eq!(config.file_prefix, "kidcon");
        assert!(config.console_output);
    }
}
