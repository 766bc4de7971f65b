//! Database connection and pool management
//!
//! The pool is created once at startup and injected into every handler
//! through [`AppState`](crate::state::AppState). Handlers never share a
//! connection; each operation checks one out (or opens a transaction)
//! for its own duration.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
        }
    }
}

/// Create a PostgreSQL connection pool from the database configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let settings = PoolSettings {
        max_connections: config.max_connections,
        ..Default::default()
    };
    create_pool_with_settings(config, &settings).await
}

/// Create a PostgreSQL connection pool with custom settings
pub async fn create_pool_with_settings(
    config: &DatabaseConfig,
    settings: &PoolSettings,
) -> Result<PgPool> {
    let pool = pool_options(settings)
        .connect_with(config.connect_options())
        .await?;

    info!(
        host = %config.host,
        database = %config.name,
        "Database pool created: max={}, min={}",
        settings.max_connections, settings.min_connections
    );

    Ok(pool)
}

/// Create a pool that connects on first use
///
/// Used by tests that exercise request paths rejected before any query runs.
pub fn create_lazy_pool(config: &DatabaseConfig) -> PgPool {
    let settings = PoolSettings {
        min_connections: 0,
        ..Default::default()
    };
    pool_options(&settings).connect_lazy_with(config.connect_options())
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
