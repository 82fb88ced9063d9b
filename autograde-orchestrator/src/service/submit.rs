//! Push submission
//!
//! Turns a validated push into a queued grading job: derive identifiers,
//! fetch the deliverable, assemble the descriptor, enqueue. Every failure
//! here happens before the job reaches the worker pool.

use std::sync::Arc;

use tracing::info;

use autograde_core::domain::descriptor::ExecutionDescriptor;
use autograde_core::domain::push::{PushEvent, RawPush};
use autograde_core::dto::JobAccepted;
use autograde_core::error::Result;

use crate::queue::{JobOpts, JobQueue};
use crate::repository::DeliverableCatalog;
use crate::service::DescriptorBuilder;

pub struct SubmitService {
    catalog: Arc<dyn DeliverableCatalog>,
    builder: DescriptorBuilder,
    queue: Arc<JobQueue<ExecutionDescriptor>>,
}

impl SubmitService {
    pub fn new(
        catalog: Arc<dyn DeliverableCatalog>,
        builder: DescriptorBuilder,
        queue: Arc<JobQueue<ExecutionDescriptor>>,
    ) -> Self {
        Self {
            catalog,
            builder,
            queue,
        }
    }

    /// Validates a raw push and schedules its grading job
    pub async fn submit(&self, raw: RawPush) -> Result<JobAccepted> {
        let push = PushEvent::from_raw(raw)?;
        let deliverable = self.catalog.get(&push.deliverable).await?;
        let descriptor = self.builder.build(&deliverable, &push).await?;

        let job_id = job_id(&push);
        let handle = self
            .queue
            .add(
                descriptor,
                JobOpts {
                    job_id,
                    retain_on_complete: false,
                },
            )
            .await?;

        info!(
            "Scheduled grading of {} @ {} for {}",
            push.repo,
            push.commit.short(),
            push.deliverable
        );

        Ok(JobAccepted { job_id: handle.id })
    }

    /// Current backlog depth, for operational health reporting
    pub fn queue_depth(&self) -> usize {
        self.queue.count()
    }
}

/// Stable job identifier; resubmitting the same push maps to the same id
fn job_id(push: &PushEvent) -> String {
    format!("{}-{}-{}", push.team, push.commit, push.deliverable)
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use autograde_core::domain::deliverable::{Deliverable, NetworkPolicy};
    use autograde_core::error::CoreError;

    use crate::config::Config;
    use crate::queue::{Job, JobProcessor};
    use crate::repository::memory::{InMemoryDeliverableCatalog, InMemoryUserDirectory};

    struct NoopProcessor;

    #[async_trait]
    impl JobProcessor<ExecutionDescriptor> for NoopProcessor {
        async fn ready(&self) -> Result<()> {
            Ok(())
        }

        async fn process(&self, _job: &Job<ExecutionDescriptor>) -> Result<()> {
            Ok(())
        }
    }

    fn config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            course_num: 310,
            sandbox_token: "token".to_string(),
            sandbox_url: "http://localhost:9000".to_string(),
            concurrency: 1,
        }
    }

    fn raw() -> RawPush {
        RawPush {
            repo: "d1_project_team10".to_string(),
            branch: "refs/heads/main".to_string(),
            commit: "1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d".to_string(),
            commit_url: "https://github.test/c/1a2b3c4".to_string(),
            project_url: "https://github.test/p/d1_project_team10".to_string(),
            user: "student1".to_string(),
            org: "CS310".to_string(),
        }
    }

    async fn service_with_catalog(catalog: Arc<InMemoryDeliverableCatalog>) -> SubmitService {
        let users = Arc::new(InMemoryUserDirectory::new());
        let builder = DescriptorBuilder::new(users, &config());
        let queue = Arc::new(JobQueue::new(
            "tests",
            1,
            Arc::new(NoopProcessor) as Arc<dyn JobProcessor<ExecutionDescriptor>>,
        ));
        SubmitService::new(catalog, builder, queue)
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let catalog = Arc::new(InMemoryDeliverableCatalog::new());
        catalog
            .put(Deliverable {
                label: "d1".to_string(),
                solution_url: "https://github.test/solutions/d1".to_string(),
                solution_commit: "0000000000000000000000000000000000000000".to_string(),
                network_policy: NetworkPolicy {
                    allow_dns: true,
                    whitelisted_hosts: vec![],
                },
                custom: serde_json::Value::Null,
            })
            .await;

        let service = service_with_catalog(catalog).await;
        let accepted = service.submit(raw()).await.unwrap();
        assert_eq!(
            accepted.job_id,
            "team10-1a2b3c4d5e6f7a8b9c0d1a2b3c4d5e6f7a8b9c0d-d1"
        );
    }

    #[tokio::test]
    async fn test_submit_unknown_deliverable() {
        let service = service_with_catalog(Arc::new(InMemoryDeliverableCatalog::new())).await;

        let err = service.submit(raw()).await.unwrap_err();
        assert!(err.is_not_found());
        // Nothing was queued
        assert_eq!(service.queue_depth(), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_commit() {
        let service = service_with_catalog(Arc::new(InMemoryDeliverableCatalog::new())).await;

        let mut bad = raw();
        bad.commit = "NOT-A-COMMIT".to_string();
        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedIdentifier(_)));
        assert_eq!(service.queue_depth(), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_repo_name() {
        let service = service_with_catalog(Arc::new(InMemoryDeliverableCatalog::new())).await;

        let mut bad = raw();
        bad.repo = "norepoconvention".to_string();
        let err = service.submit(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::MalformedIdentifier(_)));
    }
}
