use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create results table. BIGSERIAL id doubles as insertion order; the
    // logical (team, commit, deliverable, org) key is deliberately not
    // unique since re-runs insert fresh rows.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS results (
            id BIGSERIAL PRIMARY KEY,
            team VARCHAR(255) NOT NULL,
            commit VARCHAR(40) NOT NULL,
            commit_url TEXT NOT NULL,
            deliverable VARCHAR(255) NOT NULL,
            org VARCHAR(255) NOT NULL,
            report JSONB NOT NULL DEFAULT '{}',
            grade_requested BOOLEAN NOT NULL DEFAULT FALSE,
            grade_requested_at TIMESTAMPTZ,
            requestor VARCHAR(255),
            inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create deliverable catalog table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS deliverables (
            label VARCHAR(255) PRIMARY KEY,
            solution_url TEXT NOT NULL,
            solution_commit VARCHAR(40) NOT NULL,
            allow_dns BOOLEAN NOT NULL DEFAULT FALSE,
            whitelisted_hosts TEXT[] NOT NULL DEFAULT '{}',
            custom JSONB NOT NULL DEFAULT '{}'
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create user directory table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(255) PRIMARY KEY,
            csid VARCHAR(255) NOT NULL,
            snum VARCHAR(255) NOT NULL,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            profile_url TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for the two result lookup paths: latest-by-tuple and
    // reconciliation-by-commit-url
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_results_tuple ON results(team, commit, deliverable, org, id DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_results_commit_url ON results(commit_url)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
