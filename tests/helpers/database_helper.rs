//! Test database helper utilities
//!
//! Provides a migrated PostgreSQL database per test context: the one named by
//! `TEST_DATABASE_URL`, or a throwaway testcontainers instance. When neither is
//! available the context is `None` and the calling test skips itself.

use std::sync::Once;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use eventsapi::config::Settings;
use eventsapi::database::{run_migrations, DatabaseService};
use eventsapi::services::ServiceFactory;

static INIT: Once = Once::new();

/// Test database helper that manages PostgreSQL test database setup
pub struct TestDatabase {
    pub pool: PgPool,
    pub database_url: String,
    _container: Option<ContainerAsync<PostgresImage>>,
}

impl TestDatabase {
    /// Connect to a migrated, empty database, or `None` if no database can be reached
    pub async fn new() -> Option<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        let (database_url, container) = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => (url, None),
            Err(_) => {
                let container = match PostgresImage::default()
                    .with_db_name("test_eventsapi")
                    .with_user("test_user")
                    .with_password("test_password")
                    .with_tag("16-alpine")
                    .start()
                    .await
                {
                    Ok(container) => container,
                    Err(err) => {
                        eprintln!("skipping database test: cannot start postgres container: {err}");
                        return None;
                    }
                };
                let host = container.get_host().await.ok()?;
                let port = container.get_host_port_ipv4(5432).await.ok()?;
                let url = format!("postgresql://test_user:test_password@{host}:{port}/test_eventsapi");
                (url, Some(container))
            }
        };

        let pool = match PgPool::connect(&database_url).await {
            Ok(pool) => pool,
            Err(err) => {
                eprintln!("skipping database test: cannot connect to {database_url}: {err}");
                return None;
            }
        };

        run_migrations(&pool).await.expect("migrations apply cleanly");

        let db = Self {
            pool,
            database_url,
            _container: container,
        };
        db.cleanup().await.expect("test database cleanup");
        Some(db)
    }

    /// Clean all test data from the database
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE feedback, event_registrations, events, users RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count rows in a table
    pub async fn count(&self, table: &str) -> i64 {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("count query");
        count.0
    }
}

/// A database plus the services wired over it
pub struct TestContext {
    pub db: TestDatabase,
    pub database: DatabaseService,
    pub services: ServiceFactory,
    pub settings: Settings,
}

impl TestContext {
    pub async fn new() -> Option<Self> {
        let db = TestDatabase::new().await?;
        let settings = test_settings(&db.database_url);
        let database = DatabaseService::new(db.pool.clone());
        let services = ServiceFactory::new(database.clone(), &settings);

        Some(Self {
            db,
            database,
            services,
            settings,
        })
    }
}

pub fn test_settings(database_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.database.url = database_url.to_string();
    settings.auth.jwt_secret = "integration-test-secret".to_string();
    settings.auth.issuer = "eventsapi-test".to_string();
    settings
}
