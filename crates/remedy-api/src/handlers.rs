//! API Handlers
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use remedy_core::REMEDY_VERSION;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    line: String,
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": REMEDY_VERSION })),
    )
}

pub async fn status(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let snapshot = state.engine.state().snapshot();
    (
        StatusCode::OK,
        Json(json!({
            "status": "running",
            "monitoring_active": state.monitor.is_running(),
            "components": {
                "classifier": state.engine.has_classifier(),
                "kedb_entries": state.engine.kedb().len(),
                "tickets": state.engine.state().store().len(),
            },
            "stats": {
                "started_at": snapshot.started_at,
                "total_logs": snapshot.total_logs,
                "decided": snapshot.decided,
                "self_healed": snapshot.self_healed,
                "tickets_raised": snapshot.tickets_raised,
                "support_hours_saved": snapshot.hours_saved,
            },
        })),
    )
}

/// Most recent raw log lines, oldest first, default 20.
pub async fn logs(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> (StatusCode, Json<Value>) {
    let limit = params.limit.unwrap_or(20);
    let snapshot = state.engine.state().snapshot();
    let recent: Vec<_> = tail(&snapshot.recent_logs, limit);
    (StatusCode::OK, Json(json!(recent)))
}

/// Most recent decisions, oldest first, default 15.
pub async fn analyses(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> (StatusCode, Json<Value>) {
    let limit = params.limit.unwrap_or(15);
    let snapshot = state.engine.state().snapshot();
    let recent: Vec<_> = tail(&snapshot.recent_decisions, limit);
    (StatusCode::OK, Json(json!(recent)))
}

/// Most recent tickets, newest first, default 10. Reads the store, not
/// the advisory window: tickets are the system of record.
pub async fn tickets(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> (StatusCode, Json<Value>) {
    let limit = params.limit.unwrap_or(10);
    let mut all = state.engine.state().store().list();
    all.reverse();
    all.truncate(limit);
    (StatusCode::OK, Json(json!(all)))
}

/// Feed one raw log line through the engine.
pub async fn process_line(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> (StatusCode, Json<Value>) {
    match state.engine.process(&request.line).await {
        Some(decision) => (StatusCode::OK, Json(json!({ "decision": decision }))),
        None => (StatusCode::OK, Json(json!({ "skipped": true }))),
    }
}

pub async fn monitoring_start(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.monitor.start(state.engine.clone()) {
        (
            StatusCode::OK,
            Json(json!({ "message": "Monitoring started", "status": "running" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "message": "Monitoring already active", "status": "running" })),
        )
    }
}

pub async fn monitoring_stop(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.monitor.stop() {
        (
            StatusCode::OK,
            Json(json!({ "message": "Monitoring stopped", "status": "stopped" })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({ "message": "Monitoring not active", "status": "stopped" })),
        )
    }
}

pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    let snapshot = state.engine.state().snapshot();
    match crate::metrics::render(&snapshot) {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn tail<T: Clone>(items: &[T], limit: usize) -> Vec<T> {
    let start = items.len().saturating_sub(limit);
    items[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_core::KnowledgeBase;
    use remedy_engine::{CoreState, DecisionEngine};
    use remedy_store::TicketStore;
    use std::sync::Arc;

    fn app_state() -> AppState {
        let core = Arc::new(CoreState::new(TicketStore::in_memory()));
        let engine = Arc::new(DecisionEngine::new(KnowledgeBase::empty(), None, core));
        AppState::new(engine)
    }

    #[tokio::test]
    async fn test_health() {
        let (code, Json(body)) = health().await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_reports_components() {
        let state = app_state();
        let (code, Json(body)) = status(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["components"]["classifier"], false);
        assert_eq!(body["components"]["kedb_entries"], 0);
        assert_eq!(body["monitoring_active"], false);
        assert_eq!(body["stats"]["total_logs"], 0);
    }

    #[tokio::test]
    async fn test_process_without_classifier_is_skipped() {
        let state = app_state();
        let (code, Json(body)) = process_line(
            State(state.clone()),
            Json(ProcessRequest {
                line: "AUTH-403 - Missing privilege".to_string(),
            }),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["skipped"], true);
        // Ingestion still counted
        assert_eq!(state.engine.state().snapshot().total_logs, 1);
    }

    #[tokio::test]
    async fn test_logs_respects_limit() {
        let state = app_state();
        for i in 0..30 {
            state.engine.process(&format!("line {}", i)).await;
        }
        let (_, Json(body)) = logs(
            State(state),
            Query(LimitParams { limit: Some(5) }),
        )
        .await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[4]["message"], "line 29");
    }
}
