//! EventsAPI bootstrap
//!
//! Loads configuration, prepares the database schema and verifies that the
//! services can be wired. Request handling is done by the API layer.

use anyhow::Context;
use tracing::info;

use eventsapi::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", eventsapi::info());

    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    run_migrations(&pool).await?;

    let database = DatabaseService::new(pool.clone());
    let stats = database.get_system_stats().await?;
    info!(users = stats.users, events = stats.events, "Database ready");

    let _services = ServiceFactory::new(database, &settings);
    info!("Services initialized");

    pool.close().await;
    Ok(())
}
