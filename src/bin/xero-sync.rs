use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use xero_sync::config::args::EnvArgs;
use xero_sync::config::settings::Settings;
use xero_sync::server;
use xero_sync::server::server::AppState;
use xero_sync::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Resolve settings
    //
    // .env first, then environment / flags
    // -------------------------------

    dotenvy::dotenv().ok();
    let settings = Settings::resolve(EnvArgs::parse());
    settings.ensure_dirs()?;

    // -------------------------------
    // 2. Logging (stdout + LOG_DIR/app.log)
    // -------------------------------

    let _log_guard = logging::run(&settings)?;
    info!(
        storage_dir = %settings.storage_dir.display(),
        log_dir = %settings.log_dir.display(),
        allowed_origin = %settings.allowed_origin,
        "settings resolved"
    );
    if !settings.credentials.is_configured() {
        warn!(missing = ?settings.credentials.missing(), "Xero credentials missing, sync endpoints will fail");
    }

    // -------------------------------
    // 3. Build application context and serve
    // -------------------------------

    let state = AppState::build(settings)?;
    info!("Service starting...");
    server::server::start(state).await
}
