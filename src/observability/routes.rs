use std::sync::Arc;

use crate::config::settings::MetricsConfig;
use crate::observability::metrics::Metrics;
use crate::server::server::AppState;
use axum::routing::get;
use axum::{extract::State, response::IntoResponse, Router};
use http::{header::CONTENT_TYPE, StatusCode};
use prometheus::{Encoder, TextEncoder};
use tracing::error;

#[derive(Clone)]
pub struct MetricsState {
    pub metrics: Arc<Metrics>,
}

impl MetricsState {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    pub fn router(&self, metrics_config: &MetricsConfig) -> Router<AppState> {
        let mut router = Router::new();
        if metrics_config.is_enabled {
            router = router.route(metrics_config.path.as_str(), get(get_metrics));
        }
        router
    }
}

async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics_state.metrics.registry.gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("failed to encode metrics: {}", err);
        return (StatusCode::INTERNAL_SERVER_ERROR, [(CONTENT_TYPE, "text/plain")], Vec::new());
    }
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        buffer,
    )
}
