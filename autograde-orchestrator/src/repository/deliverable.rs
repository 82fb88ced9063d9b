//! Deliverable catalog backed by Postgres

use async_trait::async_trait;
use sqlx::PgPool;

use autograde_core::domain::deliverable::{Deliverable, NetworkPolicy};
use autograde_core::error::{CoreError, Result};

use crate::repository::{DeliverableCatalog, store_error};

pub struct PgDeliverableCatalog {
    pool: PgPool,
}

impl PgDeliverableCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliverableCatalog for PgDeliverableCatalog {
    async fn get(&self, label: &str) -> Result<Deliverable> {
        let row = sqlx::query_as::<_, DeliverableRow>(
            r#"
            SELECT label, solution_url, solution_commit, allow_dns, whitelisted_hosts, custom
            FROM deliverables
            WHERE label = $1
            "#,
        )
        .bind(label)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(|r| r.into())
            .ok_or_else(|| CoreError::NotFound(format!("deliverable '{}' not found", label)))
    }
}

#[derive(sqlx::FromRow)]
struct DeliverableRow {
    label: String,
    solution_url: String,
    solution_commit: String,
    allow_dns: bool,
    whitelisted_hosts: Vec<String>,
    custom: serde_json::Value,
}

impl From<DeliverableRow> for Deliverable {
    fn from(row: DeliverableRow) -> Self {
        Deliverable {
            label: row.label,
            solution_url: row.solution_url,
            solution_commit: row.solution_commit,
            network_policy: NetworkPolicy {
                allow_dns: row.allow_dns,
                whitelisted_hosts: row.whitelisted_hosts,
            },
            custom: row.custom,
        }
    }
}
