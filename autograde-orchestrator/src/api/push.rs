//! Push ingestion endpoint

use axum::{Json, extract::State};

use autograde_core::domain::push::RawPush;
use autograde_core::dto::JobAccepted;

use crate::api::AppState;
use crate::api::error::ApiResult;

/// POST /push
/// Validate an inbound push and schedule its grading job
pub async fn submit_push(
    State(state): State<AppState>,
    Json(raw): Json<RawPush>,
) -> ApiResult<Json<JobAccepted>> {
    tracing::info!("Push received for {}", raw.repo);

    let accepted = state.submit.submit(raw).await?;
    Ok(Json(accepted))
}
