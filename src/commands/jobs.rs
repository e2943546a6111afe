//! Jobs command - Background job management.
//!
//! Provides CLI commands to manage the email queue:
//! - `work`: Start the email worker process
//! - `list`: Show queued jobs by status
//! - `clear`: Remove failed jobs from the queue
//!
//! ## Usage
//!
//! ```bash
//! # Start the worker (pair with NOTIFICATION_MODE=queue on the server)
//! celebrity-booking jobs work
//!
//! # List job queue status
//! celebrity-booking jobs list
//!
//! # Clear failed jobs
//! celebrity-booking jobs clear
//! ```

use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::jobs::EmailJob;

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Open the apalis email queue, creating its tables on first use.
///
/// Shared by the worker and by the server when notifications are queued.
pub(crate) async fn email_storage(config: &Config) -> AppResult<PostgresStorage<EmailJob>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    Ok(PostgresStorage::new(pool))
}

/// Start the email worker
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;

    use crate::config::EMAIL_WORKER_NAME;
    use crate::jobs::{email_job_handler, MailSettings};

    tracing::info!("Connecting to database for job worker...");
    let storage = email_storage(config).await?;

    let mail = MailSettings::from(config);
    if mail.smtp.is_none() {
        tracing::warn!("SMTP_HOST not set, emails will be logged instead of sent");
    }

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new(EMAIL_WORKER_NAME)
        .data(mail)
        .backend(storage)
        .build_fn(email_job_handler);

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

async fn queue_connection(config: &Config) -> AppResult<Option<DatabaseConnection>> {
    let db = Database::connect_without_migrations(config).await?;
    let db = db.get_connection();

    let result = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists",
        ))
        .await?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    Ok(schema_exists.then_some(db))
}

/// List queued jobs by status
async fn list_jobs(config: &Config) -> AppResult<()> {
    tracing::info!("Connecting to database...");

    let Some(db) = queue_connection(config).await? else {
        println!("\n=== Job Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' first to create the queue tables.");
        println!("========================\n");
        return Ok(());
    };

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs GROUP BY status",
        ))
        .await?;

    let mut pending = 0i64;
    let mut running = 0i64;
    let mut failed = 0i64;
    let mut done = 0i64;

    for row in rows {
        if let (Ok(status), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            match status.as_str() {
                "Pending" => pending = count,
                "Running" => running = count,
                "Failed" | "Killed" => failed += count,
                "Done" => done = count,
                _ => {}
            }
        }
    }

    println!("\n=== Email Queue Status ===");
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    println!("==========================\n");

    Ok(())
}

/// Clear failed jobs from the queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    tracing::info!("Connecting to database...");

    let Some(db) = queue_connection(config).await? else {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    };

    let result = db
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status IN ('Failed', 'Killed')",
        ))
        .await?;

    println!(
        "Cleared {} failed job(s) from the queue.",
        result.rows_affected()
    );

    Ok(())
}
