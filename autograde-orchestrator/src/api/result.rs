//! Result ingestion and grade-request endpoints

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use autograde_core::domain::result::ResultRecord;
use autograde_core::dto::{GradeRequest, GradeRequestOutcome, LatestResultQuery, ResultPayload};

use crate::api::AppState;
use crate::api::error::ApiResult;

/// POST /result
/// Store a completed sandbox run's result
pub async fn record_result(
    State(state): State<AppState>,
    Json(payload): Json<ResultPayload>,
) -> ApiResult<StatusCode> {
    tracing::info!(
        "Result received for {} / {} / {}",
        payload.team,
        payload.deliverable,
        payload.commit
    );

    state.results.record(payload).await?;
    Ok(StatusCode::CREATED)
}

/// GET /result/latest
/// Most-recently-inserted result for a (team, commit, deliverable, org) tuple
pub async fn latest_result(
    State(state): State<AppState>,
    Query(query): Query<LatestResultQuery>,
) -> ApiResult<Json<ResultRecord>> {
    let record = state.results.latest(&query).await?;
    Ok(Json(record))
}

/// POST /grade-request
/// Flag all results under a commit URL as grade-requested
pub async fn request_grade(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> ApiResult<Json<GradeRequestOutcome>> {
    tracing::info!("Grade request for {} by {}", request.commit_url, request.requestor);

    let modified = state.results.request_grade(request).await?;
    Ok(Json(GradeRequestOutcome { modified }))
}
