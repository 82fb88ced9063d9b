//! API Module
//!
//! Thin HTTP transport over the pipeline services. All semantics live in
//! the service layer; handlers only translate between JSON and domain
//! types.

pub mod error;
pub mod health;
pub mod push;
pub mod result;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::service::{ResultService, SubmitService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub submit: Arc<SubmitService>,
    pub results: Arc<ResultService>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and backlog introspection
        .route("/health", get(health::health_check))
        .route("/queue/depth", get(health::queue_depth))
        // Push ingestion
        .route("/push", post(push::submit_push))
        // Result ingestion and grade requests
        .route("/result", post(result::record_result))
        .route("/result/latest", get(result::latest_result))
        .route("/grade-request", post(result::request_grade))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
