use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::config::args::EnvArgs;
use crate::config::credentials::Credentials;
use crate::utils::constants::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_TOKEN_URL,
};

/// ================================
/// Resolved service-wide settings
/// ================================
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub storage_dir: PathBuf,
    pub log_dir: PathBuf,
    pub allowed_origin: String,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Token endpoint and accounting API locations.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub token_url: String,
    pub api_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub path: String,
    pub is_enabled: bool,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

impl Settings {
    /// Single resolution pass: explicit value (flag or environment) > default.
    pub fn resolve(args: EnvArgs) -> Self {
        let text = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let path = |value: Option<PathBuf>| value.filter(|p| !p.as_os_str().is_empty());

        Self {
            credentials: Credentials::new(args.client_id, args.client_secret, args.scopes),
            storage_dir: path(args.storage_dir).unwrap_or_else(|| PathBuf::from("storage")),
            log_dir: path(args.log_dir).unwrap_or_else(|| PathBuf::from("logs")),
            allowed_origin: text(args.allowed_origin)
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_owned()),
            server: ServerConfig {
                host: text(args.host).unwrap_or_else(|| "127.0.0.1".to_owned()),
                port: args.port.unwrap_or(8080),
            },
            upstream: UpstreamConfig {
                token_url: text(args.token_url).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_owned()),
                api_url: text(args.api_url)
                    .map(|url| url.trim_end_matches('/').to_owned())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
                timeout: Duration::from_millis(
                    args.http_timeout_ms.unwrap_or(DEFAULT_HTTP_TIMEOUT_MS),
                ),
            },
            logging: LoggingConfig::new(
                args.log_level
                    .map(|level| level.as_str().to_lowercase())
                    .unwrap_or_else(|| "info".to_owned()),
                args.log_format.unwrap_or_default(),
            ),
            metrics: MetricsConfig {
                path: "/metrics".to_owned(),
                is_enabled: args.metrics_enabled.unwrap_or(false),
            },
        }
    }

    /// Create the storage and log directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.storage_dir, &self.log_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create directory {}", dir.display()))?;
        }
        Ok(())
    }
}
