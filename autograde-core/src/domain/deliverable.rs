//! Deliverable domain types

use serde::{Deserialize, Serialize};

/// Network restrictions applied to a sandbox run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkPolicy {
    /// Whether the sandbox may resolve DNS at all
    pub allow_dns: bool,
    /// Hosts the sandbox may reach even with DNS disabled
    pub whitelisted_hosts: Vec<String>,
}

/// A gradable assignment as stored in the deliverable catalog
///
/// Owned by the catalog; the core fetches by label and never mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliverable {
    /// Short label, e.g. `d1`
    pub label: String,
    /// Repository URL of the reference solution
    pub solution_url: String,
    /// Commit of the reference solution to grade against
    pub solution_commit: String,
    pub network_policy: NetworkPolicy,
    /// Per-deliverable configuration blob passed through to the sandbox
    pub custom: serde_json::Value,
}
