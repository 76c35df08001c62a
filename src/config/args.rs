use std::path::PathBuf;

use clap::Parser;

use crate::config::settings::LogFormat;
use crate::utils::constants::{ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_SCOPES};
use crate::utils::logging::LogLevel;

/// Startup options. Every option can come from the environment (or `.env`);
/// a flag on the command line wins over the environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(author, version, about, long_about = None)]
pub struct EnvArgs {
    #[arg(long, env = ENV_CLIENT_ID)]
    pub client_id: Option<String>,
    #[arg(long, env = ENV_CLIENT_SECRET, hide_env_values = true)]
    pub client_secret: Option<String>,
    /// Space-delimited OAuth2 scopes
    #[arg(long, env = ENV_SCOPES)]
    pub scopes: Option<String>,

    #[arg(long, env = "STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "XERO_TOKEN_URL")]
    pub token_url: Option<String>,
    #[arg(long, env = "XERO_API_URL")]
    pub api_url: Option<String>,
    #[arg(long, env = "HTTP_TIMEOUT_MS")]
    pub http_timeout_ms: Option<u64>,

    #[arg(long, env = "LOG_LEVEL", value_enum, ignore_case = true)]
    pub log_level: Option<LogLevel>,
    #[arg(long, env = "LOG_FORMAT", value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,
    #[arg(long, env = "METRICS_ENABLED")]
    pub metrics_enabled: Option<bool>,
}
