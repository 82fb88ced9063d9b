//! Result record domain type

use serde::{Deserialize, Serialize};

/// One stored outcome of a sandbox run
///
/// Logically keyed by (team, commit, deliverable, org); re-runs of the same
/// push produce additional rows, so the tuple is not unique and "latest"
/// means most-recently-inserted. Records are mutated only by grade-request
/// reconciliation and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub team: String,
    /// Full 40-character commit string
    pub commit: String,
    pub commit_url: String,
    pub deliverable: String,
    pub org: String,
    /// Raw test output / score payload from the sandbox
    pub report: serde_json::Value,
    /// Set by reconciliation when a human asks for this commit to be graded
    pub grade_requested: bool,
    pub grade_requested_at: Option<chrono::DateTime<chrono::Utc>>,
    pub requestor: Option<String>,
}

impl ResultRecord {
    /// A fresh record for an incoming sandbox result, not yet grade-requested
    pub fn new(
        team: impl Into<String>,
        commit: impl Into<String>,
        commit_url: impl Into<String>,
        deliverable: impl Into<String>,
        org: impl Into<String>,
        report: serde_json::Value,
    ) -> Self {
        Self {
            team: team.into(),
            commit: commit.into(),
            commit_url: commit_url.into(),
            deliverable: deliverable.into(),
            org: org.into(),
            report,
            grade_requested: false,
            grade_requested_at: None,
            requestor: None,
        }
    }
}
