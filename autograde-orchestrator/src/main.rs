//! Autograde Orchestrator
//!
//! Ingests repository-push events, schedules one sandboxed test execution
//! per push through a concurrency-bounded job queue, stores the resulting
//! grade records, and reconciles them against later-arriving grade
//! requests.
//!
//! Architecture:
//! - Configuration: explicit struct loaded from the environment at startup
//! - Repositories: Postgres-backed stores behind injectable traits
//! - Services: descriptor assembly, submission, results, reconciliation
//! - Queue: bounded worker pool with an injected grading processor
//! - API: thin axum transport over the services

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod db;
pub mod queue;
pub mod repository;
pub mod sandbox;
pub mod service;

use crate::api::AppState;
use crate::config::Config;
use crate::queue::JobQueue;
use crate::repository::deliverable::PgDeliverableCatalog;
use crate::repository::result::PgResultStore;
use crate::repository::user::PgUserDirectory;
use crate::repository::{DeliverableCatalog, ResultStore, UserDirectory};
use crate::sandbox::HttpSandboxRunner;
use crate::service::{DescriptorBuilder, GradingProcessor, ResultService, SubmitService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autograde_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autograde Orchestrator...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: course_num={}, concurrency={}",
        config.course_num, config.concurrency
    );

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    // Stores
    let results: Arc<dyn ResultStore> = Arc::new(PgResultStore::new(pool.clone()));
    let catalog: Arc<dyn DeliverableCatalog> = Arc::new(PgDeliverableCatalog::new(pool.clone()));
    let users: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(pool.clone()));

    // Queue with the grading processor as its execution strategy
    let sandbox = Arc::new(HttpSandboxRunner::new(config.sandbox_url.clone()));
    let processor = Arc::new(GradingProcessor::new(sandbox, Arc::clone(&results)));
    let queue = Arc::new(JobQueue::new("autograde", config.concurrency, processor));

    // Startup aborts if the sandbox relay is unreachable; the supervisor
    // is responsible for retrying
    queue.init().await.context("Failed to start job queue")?;

    // Services
    let builder = DescriptorBuilder::new(Arc::clone(&users), &config);
    let submit = Arc::new(SubmitService::new(catalog, builder, Arc::clone(&queue)));
    let result_service = Arc::new(ResultService::new(Arc::clone(&results)));

    let app = api::create_router(AppState {
        submit,
        results: result_service,
    });

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
