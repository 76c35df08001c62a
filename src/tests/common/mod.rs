// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use reqwest::Client;

use crate::cache::token_store::TokenStore;
use crate::config::args::EnvArgs;
use crate::config::credentials::Credentials;
use crate::config::settings::Settings;
use crate::observability::metrics::Metrics;
use crate::server::server::AppState;
use crate::sources::authenticator::TokenAuthenticator;
use crate::sources::oauth2::OAuth2Source;

pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const TOKEN_PATH: &str = "/connect/token";
pub const API_PATH: &str = "/api.xro/2.0";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn configured_credentials(scopes: Option<&str>) -> Credentials {
    Credentials::new(
        Some("test_client_id".into()),
        Some("test_client_secret".into()),
        scopes.map(str::to_owned),
    )
}

/// Authenticator against `token_url`, caching in `storage_dir/tokens.json`.
pub fn authenticator(storage_dir: &Path, token_url: &str, credentials: Credentials) -> TokenAuthenticator {
    authenticator_with_timeout(storage_dir, token_url, credentials, 2_000)
}

pub fn authenticator_with_timeout(
    storage_dir: &Path,
    token_url: &str,
    credentials: Credentials,
    timeout_ms: u64,
) -> TokenAuthenticator {
    let client = Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .build()
        .expect("reqwest client");
    TokenAuthenticator::new(
        credentials,
        TokenStore::new(storage_dir.join("tokens.json")),
        OAuth2Source::new(token_url.to_owned(), client),
        Arc::new(Metrics::new().expect("metrics")),
    )
}

/// Settings pointing both upstreams at `upstream_base` (a mock server).
pub fn settings(storage_dir: &Path, upstream_base: &str, configured: bool) -> Settings {
    Settings::resolve(EnvArgs {
        client_id: configured.then(|| "test_client_id".to_owned()),
        client_secret: configured.then(|| "test_client_secret".to_owned()),
        storage_dir: Some(storage_dir.to_path_buf()),
        log_dir: Some(storage_dir.join("logs")),
        allowed_origin: Some(TEST_ORIGIN.to_owned()),
        token_url: Some(format!("{}{}", upstream_base, TOKEN_PATH)),
        api_url: Some(format!("{}{}", upstream_base, API_PATH)),
        http_timeout_ms: Some(2_000),
        ..Default::default()
    })
}

pub fn app_state(settings: Settings) -> AppState {
    AppState::build(settings).expect("app state")
}

pub fn token_body() -> serde_json::Value {
    json!({"access_token": "abc", "expires_in": 1800, "token_type": "Bearer"})
}
