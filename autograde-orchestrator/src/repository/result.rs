//! Result store backed by Postgres
//!
//! Handles all database operations related to result records.

use async_trait::async_trait;
use sqlx::PgPool;

use autograde_core::domain::result::ResultRecord;
use autograde_core::error::{CoreError, Result};

use crate::repository::{ResultStore, store_error};

pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn insert(&self, record: &ResultRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO results (team, commit, commit_url, deliverable, org, report,
                                 grade_requested, grade_requested_at, requestor)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&record.team)
        .bind(&record.commit)
        .bind(&record.commit_url)
        .bind(&record.deliverable)
        .bind(&record.org)
        .bind(&record.report)
        .bind(record.grade_requested)
        .bind(record.grade_requested_at)
        .bind(&record.requestor)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::PersistenceError(format!(
                "zero rows inserted for {}/{}/{}",
                record.team, record.commit, record.deliverable
            )));
        }

        Ok(())
    }

    async fn get_latest(
        &self,
        team: &str,
        commit: &str,
        deliverable: &str,
        org: &str,
    ) -> Result<ResultRecord> {
        let row = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT team, commit, commit_url, deliverable, org, report,
                   grade_requested, grade_requested_at, requestor
            FROM results
            WHERE team = $1 AND commit = $2 AND deliverable = $3 AND org = $4
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(team)
        .bind(commit)
        .bind(deliverable)
        .bind(org)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(|r| r.into()).ok_or_else(|| {
            CoreError::NotFound(format!(
                "no result for {}, {}, {}, {}",
                org, team, commit, deliverable
            ))
        })
    }

    async fn reconcile_grade_request(&self, commit_url: &str, requestor: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE results
            SET grade_requested = TRUE, grade_requested_at = $1, requestor = $2
            WHERE commit_url = $3
            "#,
        )
        .bind(chrono::Utc::now())
        .bind(requestor)
        .bind(commit_url)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct ResultRow {
    team: String,
    commit: String,
    commit_url: String,
    deliverable: String,
    org: String,
    report: serde_json::Value,
    grade_requested: bool,
    grade_requested_at: Option<chrono::DateTime<chrono::Utc>>,
    requestor: Option<String>,
}

impl From<ResultRow> for ResultRecord {
    fn from(row: ResultRow) -> Self {
        ResultRecord {
            team: row.team,
            commit: row.commit,
            commit_url: row.commit_url,
            deliverable: row.deliverable,
            org: row.org,
            report: row.report,
            grade_requested: row.grade_requested,
            grade_requested_at: row.grade_requested_at,
            requestor: row.requestor,
        }
    }
}
