//! Error taxonomy shared across the pipeline

use thiserror::Error;

/// Result type alias for core pipeline operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the test-job pipeline
///
/// Propagation policy:
/// - identifier and descriptor-building errors abort before a job is queued
/// - queue connectivity errors abort `init()` and are retried by the caller
/// - a missing user during descriptor assembly is NOT an error (null fields)
/// - reconciliation matching zero records is NOT an error (count 0)
#[derive(Debug, Error)]
pub enum CoreError {
    /// A commit or repository string failed shape validation
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// An external collaborator (catalog, directory, store, relay) is unreachable
    #[error("dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// No record matched the lookup
    #[error("not found: {0}")]
    NotFound(String),

    /// The store reported zero rows written on an insert expected to succeed
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// The job queue's backing store could not be reached during init
    #[error("queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl CoreError {
    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
