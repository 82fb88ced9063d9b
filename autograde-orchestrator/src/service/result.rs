//! Result recording and grade-request reconciliation

use std::sync::Arc;

use tracing::info;

use autograde_core::domain::commit::CommitId;
use autograde_core::domain::result::ResultRecord;
use autograde_core::dto::{GradeRequest, LatestResultQuery, ResultPayload};
use autograde_core::error::{CoreError, Result};

use crate::repository::ResultStore;

pub struct ResultService {
    store: Arc<dyn ResultStore>,
}

impl ResultService {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self { store }
    }

    /// Persists an incoming sandbox result
    pub async fn record(&self, payload: ResultPayload) -> Result<()> {
        if !CommitId::is_valid(&payload.commit) {
            return Err(CoreError::MalformedIdentifier(format!(
                "invalid commit string '{}' in result payload",
                payload.commit
            )));
        }

        let record = ResultRecord::new(
            payload.team,
            payload.commit,
            payload.commit_url,
            payload.deliverable,
            payload.org,
            payload.report,
        );
        self.store.insert(&record).await
    }

    /// Flags every stored result sharing the commit URL as grade-requested
    ///
    /// Zero matches is a benign no-op; the same request applied twice sets
    /// the same fields again and reports the same count.
    pub async fn request_grade(&self, request: GradeRequest) -> Result<u64> {
        let modified = self
            .store
            .reconcile_grade_request(&request.commit_url, &request.requestor)
            .await?;

        if modified == 0 {
            info!(
                "No result records under URL {} to flag as grade-requested",
                request.commit_url
            );
        } else {
            info!(
                "Flagged {} result record(s) as grade-requested by {}",
                modified, request.requestor
            );
        }

        Ok(modified)
    }

    /// Most-recently-inserted result for one graded push
    pub async fn latest(&self, query: &LatestResultQuery) -> Result<ResultRecord> {
        self.store
            .get_latest(&query.team, &query.commit, &query.deliverable, &query.org)
            .await
    }
}
