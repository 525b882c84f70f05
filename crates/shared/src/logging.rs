//! Logging infrastructure for the animanga catalog.
//!
//! Structured `tracing` output to the console and to a daily rolling file,
//! with crate-specific levels that `RUST_LOG` can override.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log directory path
    pub log_dir: String,
    /// Component name (used for log file naming)
    pub component: String,
    /// Default log level
    pub default_level: Level,
    /// Enable console output
    pub console: bool,
    /// Enable file output
    pub file: bool,
    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "data/logs".to_string(),
            component: "animanga".to_string(),
            default_level: Level::INFO,
            console: true,
            file: true,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Filter directives used when `RUST_LOG` is not set
    pub fn filter_directives(&self) -> String {
        let level = self.default_level;
        format!(
            "{}={level},catalog={level},shared={level},hyper=warn,reqwest=warn,h2=warn",
            self.component.replace('-', "_"),
        )
    }
}

/// Initialize logging with the given configuration
///
/// Console output goes to stderr so that command output on stdout stays
/// machine-readable. File output rotates daily.
pub fn init(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console {
        layers.push(console_layer());
    }

    if config.file {
        let log_dir = Path::new(&config.log_dir);
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", config.log_dir))?;
        layers.push(file_layer(log_dir, &config.component, config.json_format));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        component = %config.component,
        log_dir = %config.log_dir,
        "Logging initialized"
    );

    Ok(())
}

fn console_layer() -> BoxedLayer {
    fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .boxed()
}

fn file_layer(log_dir: &Path, component: &str, json: bool) -> BoxedLayer {
    let file_appender = tracing_appender::rolling::daily(log_dir, component);

    if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(file_appender)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(file_appender)
            .boxed()
    }
}
