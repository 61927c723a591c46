//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::{Duration, Instant};
use crate::config::DatabaseConfig;
use crate::utils::errors::EventsApiError;
use crate::utils::logging::log_database_operation;

pub type DatabasePool = Pool<Postgres>;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, EventsApiError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(&config.url)
        .await?;

    health_check(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), EventsApiError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), EventsApiError> {
    let started = Instant::now();
    let result = sqlx::query("SELECT 1").execute(pool).await;
    log_database_operation("health_check", "-", started.elapsed().as_millis() as u64, result.is_ok());
    result?;

    Ok(())
}
