//! Repository layer
//!
//! Trait-based store access so services can be exercised against in-memory
//! implementations in tests and Postgres in production.

pub mod deliverable;
pub mod result;
pub mod user;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use autograde_core::domain::deliverable::Deliverable;
use autograde_core::domain::result::ResultRecord;
use autograde_core::domain::user::UserProfile;
use autograde_core::error::{CoreError, Result};

/// Persistent store of sandbox results
///
/// The connection may be shared across concurrent callers without extra
/// locking: every mutation is a single atomic store operation (one insert,
/// one bulk update), so no cross-operation transaction is needed.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists a new record; always an insert, never an upsert
    async fn insert(&self, record: &ResultRecord) -> Result<()>;

    /// Most-recently-inserted record matching the 4-tuple
    async fn get_latest(
        &self,
        team: &str,
        commit: &str,
        deliverable: &str,
        org: &str,
    ) -> Result<ResultRecord>;

    /// Flags every record sharing `commit_url` as grade-requested, stamping
    /// the current time and the requestor in one bulk update. Returns the
    /// modified count; zero matches is a benign no-op.
    async fn reconcile_grade_request(&self, commit_url: &str, requestor: &str) -> Result<u64>;
}

/// Read-only deliverable catalog
#[async_trait]
pub trait DeliverableCatalog: Send + Sync {
    /// Fetches a deliverable by label; `NotFound` if unknown
    async fn get(&self, label: &str) -> Result<Deliverable>;
}

/// Read-only user directory
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a profile; `Ok(None)` for an unknown username
    async fn get(&self, username: &str) -> Result<Option<UserProfile>>;
}

/// Maps sqlx failures into the pipeline taxonomy at the store boundary
pub(crate) fn store_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::RowNotFound => CoreError::NotFound("no matching record".to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            CoreError::DependencyUnavailable(format!("result store unreachable: {}", err))
        }
        other => CoreError::PersistenceError(other.to_string()),
    }
}
