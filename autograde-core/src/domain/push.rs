//! Push event domain type

use serde::{Deserialize, Serialize};

use crate::domain::commit::CommitId;
use crate::error::Result;
use crate::identifier;

/// A validated repository-push notification
///
/// Created once per inbound push by the webhook layer, never mutated.
/// The team and deliverable labels are derived from the repository full
/// name (`<deliverable>_<...>_<team>`) at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    /// Repository full name, e.g. `d1_project_team10`
    pub repo: String,
    /// Branch ref, e.g. `refs/heads/main`
    pub branch: String,
    pub commit: CommitId,
    pub commit_url: String,
    pub project_url: String,
    /// Username of the pushing account
    pub user: String,
    /// Organization the repository belongs to
    pub org: String,
    /// Deliverable label parsed from the repository name
    pub deliverable: String,
    /// Team label parsed from the repository name
    pub team: String,
}

/// Raw push fields as delivered by the webhook layer, before derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPush {
    pub repo: String,
    pub branch: String,
    pub commit: String,
    pub commit_url: String,
    pub project_url: String,
    pub user: String,
    pub org: String,
}

impl PushEvent {
    /// Validates a raw push and derives team/deliverable labels
    ///
    /// Fails with `MalformedIdentifier` on a bad commit string or a
    /// repository name that does not follow the naming convention.
    pub fn from_raw(raw: RawPush) -> Result<Self> {
        let commit = CommitId::parse(raw.commit)?;
        let team = identifier::derive_team(&raw.repo)?;
        let deliverable = identifier::derive_deliverable(&raw.repo)?;

        Ok(Self {
            repo: raw.repo,
            branch: raw.branch,
            commit,
            commit_url: raw.commit_url,
            project_url: raw.project_url,
            user: raw.user,
            org: raw.org,
            deliverable,
            team,
        })
    }
}
