//! Remedy API /v1: REST surface over the decision engine.
pub mod handlers;
pub mod metrics;
pub mod monitor;

use axum::{
    routing::{get, post},
    Router,
};
use remedy_engine::DecisionEngine;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use monitor::Monitor;

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub monitor: Arc<Monitor>,
}

impl AppState {
    pub fn new(engine: Arc<DecisionEngine>) -> Self {
        Self {
            engine,
            monitor: Arc::new(Monitor::new()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/status", get(handlers::status))
        .route("/v1/logs", get(handlers::logs))
        .route("/v1/analyses", get(handlers::analyses))
        .route("/v1/tickets", get(handlers::tickets))
        .route("/v1/process", post(handlers::process_line))
        .route("/v1/monitoring/start", post(handlers::monitoring_start))
        .route("/v1/monitoring/stop", post(handlers::monitoring_stop))
        .route("/v1/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Remedy API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
