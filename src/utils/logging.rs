use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::settings::{LogFormat, LoggingConfig, Settings};
use crate::utils::constants::LOG_FILE;


#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "TRACE",
            LogLevel::DEBUG => "DEBUG",
            LogLevel::INFO => "INFO",
            LogLevel::WARN => "WARN",
            LogLevel::ERROR => "ERROR",
        }
    }
}


/// Install the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes `LOG_DIR/app.log`.
pub fn run(settings: &Settings) -> Result<WorkerGuard> {
    init_logging(&settings.logging, &settings.log_dir)
}


/// Initialize tracing with the desired config: stdout in the configured
/// format plus a plain-text copy in the log directory.
pub fn init_logging(cfg: &LoggingConfig, log_dir: &Path) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&cfg.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)
        .with_context(|| format!("cannot open log file in {}", log_dir.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false);

    // Base layer: filter + log file
    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    // Choose stdout format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flat fields for CRI log parsers
                .with_ansi(false); // CRI parsers dislike ANSI color codes

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
    Ok(guard)
}
