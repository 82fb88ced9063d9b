//! DTOs for the orchestrator API surface

use serde::{Deserialize, Serialize};

/// Result payload posted by the sandbox runner (or its relay) on completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPayload {
    pub team: String,
    pub commit: String,
    pub commit_url: String,
    pub deliverable: String,
    pub org: String,
    /// Raw test output / score payload
    pub report: serde_json::Value,
}

/// A late-arriving "please grade this commit" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub commit_url: String,
    /// Username of the person who asked for the grade
    pub requestor: String,
}

/// Outcome of grade-request reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequestOutcome {
    /// Number of result records flagged by the bulk update
    pub modified: u64,
}

/// Acknowledgement that a push was accepted onto the queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAccepted {
    /// Stable job identifier derived from team, commit, and deliverable
    pub job_id: String,
}

/// Lookup key for the latest result of one graded push
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestResultQuery {
    pub team: String,
    pub commit: String,
    pub deliverable: String,
    pub org: String,
}

/// Backlog introspection for operational health reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueDepth {
    /// Queued plus running jobs
    pub depth: usize,
}
