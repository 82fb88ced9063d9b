//! Execution descriptor handed to the sandbox runner

use serde::{Deserialize, Serialize};

use crate::domain::deliverable::NetworkPolicy;

/// User fields of an execution descriptor
///
/// Every field is optional: a push by an account the user directory does
/// not know still gets graded, with these fields left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptorUserInfo {
    pub username: Option<String>,
    pub csid: Option<String>,
    pub snum: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_url: Option<String>,
}

/// Push fields of an execution descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorPushInfo {
    pub commit: String,
    pub branch: String,
    pub commit_url: String,
    pub project_url: String,
    pub repo: String,
}

/// Deliverable fields of an execution descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorDeliverableInfo {
    pub solution_url: String,
    pub solution_commit: String,
    /// Label of the deliverable this run is graded against
    pub deliverable_to_mark: String,
}

/// The complete, self-contained input for one sandbox run
///
/// Built fresh per job and never reused. Carries a one-time secret token
/// that must never reach long-term storage; the `Debug` impl redacts it
/// so the descriptor is safe to log.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExecutionDescriptor {
    pub user_info: DescriptorUserInfo,
    pub push_info: DescriptorPushInfo,
    pub deliverable_info: DescriptorDeliverableInfo,
    pub org: String,
    pub network_policy: NetworkPolicy,
    pub course_num: u32,
    pub team_id: String,
    pub custom: serde_json::Value,
    /// One-time transport secret for the sandbox; excluded from Debug output
    pub secret_token: String,
}

impl std::fmt::Debug for ExecutionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionDescriptor")
            .field("user_info", &self.user_info)
            .field("push_info", &self.push_info)
            .field("deliverable_info", &self.deliverable_info)
            .field("org", &self.org)
            .field("network_policy", &self.network_policy)
            .field("course_num", &self.course_num)
            .field("team_id", &self.team_id)
            .field("custom", &self.custom)
            .field("secret_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let descriptor = ExecutionDescriptor {
            user_info: DescriptorUserInfo::default(),
            push_info: DescriptorPushInfo {
                commit: "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d".to_string(),
                branch: "refs/heads/main".to_string(),
                commit_url: "https://github.test/c/1".to_string(),
                project_url: "https://github.test/p/1".to_string(),
                repo: "d1_project_team10".to_string(),
            },
            deliverable_info: DescriptorDeliverableInfo {
                solution_url: "https://github.test/solutions/d1".to_string(),
                solution_commit: "0000000000000000000000000000000000000000".to_string(),
                deliverable_to_mark: "d1".to_string(),
            },
            org: "CS310".to_string(),
            network_policy: NetworkPolicy {
                allow_dns: false,
                whitelisted_hosts: vec![],
            },
            course_num: 310,
            team_id: "team10".to_string(),
            custom: serde_json::Value::Null,
            secret_token: "super-secret".to_string(),
        };

        let rendered = format!("{:?}", descriptor);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
