//! Health Check API Handlers
//!
//! Health and backlog endpoints for monitoring.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use autograde_core::dto::QueueDepth;

use crate::api::AppState;

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /queue/depth
/// Current backlog (queued + running jobs)
pub async fn queue_depth(State(state): State<AppState>) -> Json<QueueDepth> {
    Json(QueueDepth {
        depth: state.submit.queue_depth(),
    })
}
