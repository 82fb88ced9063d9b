//! Identifier utilities
//!
//! Repository full names follow the convention `<deliverable>_<...>_<team>`,
//! e.g. `d1_project_team10` carries deliverable `d1` and team `team10`.
//! These helpers are pure functions over strings; commit validation lives on
//! [`CommitId`](crate::domain::commit::CommitId).

use crate::error::{CoreError, Result};

/// Returns the team label: the substring after the last `_`
pub fn derive_team(repo_full_name: &str) -> Result<String> {
    match repo_full_name.rfind('_') {
        Some(idx) if idx + 1 < repo_full_name.len() => {
            Ok(repo_full_name[idx + 1..].to_string())
        }
        _ => Err(CoreError::MalformedIdentifier(format!(
            "no team suffix in repository name '{}'",
            repo_full_name
        ))),
    }
}

/// Returns the deliverable label: the substring before the first `_`
pub fn derive_deliverable(repo_full_name: &str) -> Result<String> {
    match repo_full_name.find('_') {
        Some(idx) if idx > 0 => Ok(repo_full_name[..idx].to_string()),
        _ => Err(CoreError::MalformedIdentifier(format!(
            "no deliverable prefix in repository name '{}'",
            repo_full_name
        ))),
    }
}
