//! Execution descriptor assembly
//!
//! A sequential pipeline of explicit steps: user lookup, deliverable field
//! copy, push field copy, secret injection. The only tolerated failure is
//! a user missing from the directory, which yields empty user fields; any
//! other lookup failure aborts before the job reaches the queue.

use std::sync::Arc;

use tracing::warn;

use autograde_core::domain::deliverable::Deliverable;
use autograde_core::domain::descriptor::{
    DescriptorDeliverableInfo, DescriptorPushInfo, DescriptorUserInfo, ExecutionDescriptor,
};
use autograde_core::domain::push::PushEvent;
use autograde_core::domain::user::UserProfile;
use autograde_core::error::Result;

use crate::config::Config;
use crate::repository::UserDirectory;

pub struct DescriptorBuilder {
    users: Arc<dyn UserDirectory>,
    course_num: u32,
    sandbox_token: String,
}

impl DescriptorBuilder {
    pub fn new(users: Arc<dyn UserDirectory>, config: &Config) -> Self {
        Self {
            users,
            course_num: config.course_num,
            sandbox_token: config.sandbox_token.clone(),
        }
    }

    /// Assembles the complete sandbox input for one push
    pub async fn build(
        &self,
        deliverable: &Deliverable,
        push: &PushEvent,
    ) -> Result<ExecutionDescriptor> {
        let user_info = self.lookup_user_info(&push.user).await?;

        Ok(ExecutionDescriptor {
            user_info,
            push_info: push_info(push),
            deliverable_info: deliverable_info(deliverable, push),
            org: push.org.clone(),
            network_policy: deliverable.network_policy.clone(),
            course_num: self.course_num,
            team_id: push.team.clone(),
            custom: deliverable.custom.clone(),
            secret_token: self.sandbox_token.clone(),
        })
    }

    /// User lookup step; a missing profile is tolerated, not an error
    async fn lookup_user_info(&self, username: &str) -> Result<DescriptorUserInfo> {
        match self.users.get(username).await? {
            Some(profile) => Ok(user_info(profile)),
            None => {
                warn!(
                    "User '{}' not found in the directory; descriptor will have empty user fields",
                    username
                );
                Ok(DescriptorUserInfo::default())
            }
        }
    }
}

fn user_info(profile: UserProfile) -> DescriptorUserInfo {
    DescriptorUserInfo {
        username: Some(profile.username),
        csid: Some(profile.csid),
        snum: Some(profile.snum),
        first_name: Some(profile.first_name),
        last_name: Some(profile.last_name),
        profile_url: Some(profile.profile_url),
    }
}

fn push_info(push: &PushEvent) -> DescriptorPushInfo {
    DescriptorPushInfo {
        commit: push.commit.to_string(),
        branch: push.branch.clone(),
        commit_url: push.commit_url.clone(),
        project_url: push.project_url.clone(),
        repo: push.repo.clone(),
    }
}

fn deliverable_info(deliverable: &Deliverable, push: &PushEvent) -> DescriptorDeliverableInfo {
    DescriptorDeliverableInfo {
        solution_url: deliverable.solution_url.clone(),
        solution_commit: deliverable.solution_commit.clone(),
        deliverable_to_mark: push.deliverable.clone(),
    }
}
