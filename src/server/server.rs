use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{any, get, post};
use axum::{middleware, Router};
use reqwest::Client;
use tokio::signal::unix::{signal, SignalKind};
use tokio::select;
use tracing::info;

use crate::cache::token_store::TokenStore;
use crate::config::settings::Settings;
use crate::observability::metrics::Metrics;
use crate::observability::routes::MetricsState;
use crate::server::cors::{cors, CorsPolicy};
use crate::server::{download, routes};
use crate::sinks::snapshot::SnapshotWriter;
use crate::sources::accounting::AccountingClient;
use crate::sources::authenticator::TokenAuthenticator;
use crate::sources::fetcher::ResourceFetcher;
use crate::sources::oauth2::OAuth2Source;
use crate::utils::constants::TOKEN_FILE;

/// Application context built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub authenticator: Arc<TokenAuthenticator>,
    pub fetcher: Arc<ResourceFetcher>,
    pub snapshots: SnapshotWriter,
    pub metrics_state: MetricsState,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn build(settings: Settings) -> Result<Self> {
        let metrics = Arc::new(Metrics::new().context("cannot register metrics")?);
        let client = Client::builder()
            .timeout(settings.upstream.timeout)
            .build()
            .context("cannot build HTTP client")?;

        let store = TokenStore::new(settings.storage_dir.join(TOKEN_FILE));
        let endpoint = OAuth2Source::new(settings.upstream.token_url.clone(), client.clone());
        let authenticator = Arc::new(TokenAuthenticator::new(
            settings.credentials.clone(),
            store,
            endpoint,
            metrics.clone(),
        ));
        let api = AccountingClient::new(&settings.upstream.api_url, client);
        let fetcher = Arc::new(ResourceFetcher::new(authenticator.clone(), api, metrics.clone()));
        let snapshots = SnapshotWriter::new(settings.storage_dir.clone(), metrics.clone());

        let allow_origin = HeaderValue::from_str(&settings.allowed_origin)
            .with_context(|| format!("invalid ALLOWED_ORIGIN '{}'", settings.allowed_origin))?;

        Ok(Self {
            settings: Arc::new(settings),
            authenticator,
            fetcher,
            snapshots,
            metrics_state: MetricsState::new(metrics),
            cors: CorsPolicy::new(allow_origin),
        })
    }
}

/// Full HTTP surface; every response passes through the CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", any(routes::health))
        .route("/auth/status", get(routes::auth_status).fallback(routes::not_found))
        .route("/sync/accounts", post(routes::sync_accounts).fallback(routes::not_found))
        .route("/sync/vendors", post(routes::sync_vendors).fallback(routes::not_found))
        .route("/api/download/{file}", get(download::download).fallback(routes::not_found))
        .merge(state.metrics_state.router(&state.settings.metrics))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(state.cors.clone(), cors))
        .with_state(state)
}

pub async fn start(state: AppState) -> Result<()> {
    let bind_addr = format!("{}:{}", state.settings.server.host, state.settings.server.port);
    let metrics = state.metrics_state.metrics.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let (Ok(mut sigint), Ok(mut sigterm)) = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) else {
        // no signal handlers available: run until the process is killed
        return std::future::pending().await;
    };
    select! {
        _ = sigint.recv() => info!("Received SIGINT (Ctrl+C). Initiating graceful shutdown..."),
        _ = sigterm.recv() => info!("Received SIGTERM. Initiating graceful shutdown..."),
    }
}
