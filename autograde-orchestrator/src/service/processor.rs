//! Grading job processor
//!
//! The strategy the queue's worker pool invokes: run the descriptor in the
//! sandbox, persist the resulting record. The descriptor (and its secret
//! token) never reaches the store; only the fields needed to key the result
//! are copied out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use autograde_core::domain::descriptor::ExecutionDescriptor;
use autograde_core::domain::result::ResultRecord;
use autograde_core::error::Result;

use crate::queue::{Job, JobProcessor};
use crate::repository::ResultStore;
use crate::sandbox::SandboxRunner;

pub struct GradingProcessor {
    sandbox: Arc<dyn SandboxRunner>,
    results: Arc<dyn ResultStore>,
}

impl GradingProcessor {
    pub fn new(sandbox: Arc<dyn SandboxRunner>, results: Arc<dyn ResultStore>) -> Self {
        Self { sandbox, results }
    }
}

#[async_trait]
impl JobProcessor<ExecutionDescriptor> for GradingProcessor {
    async fn ready(&self) -> Result<()> {
        self.sandbox.ready().await
    }

    async fn process(&self, job: &Job<ExecutionDescriptor>) -> Result<()> {
        let descriptor = &job.payload;
        let report = self.sandbox.run(descriptor).await?;

        let record = ResultRecord::new(
            descriptor.team_id.clone(),
            descriptor.push_info.commit.clone(),
            descriptor.push_info.commit_url.clone(),
            descriptor.deliverable_info.deliverable_to_mark.clone(),
            descriptor.org.clone(),
            report,
        );

        self.results.insert(&record).await?;

        info!(
            "Stored result for {} / {} / {}",
            record.team, record.deliverable, record.commit
        );
        Ok(())
    }
}
