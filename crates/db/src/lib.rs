//! PostgreSQL persistence for the rental marketplace.
//!
//! - [`models`] -- `FromRow` row structs plus typed create/update DTOs.
//! - [`repositories`] -- zero-sized repository structs whose async methods
//!   take `&PgPool` as the first argument.

use rentwise_core::rental::{FURNISHED_NAMES, UNFURNISHED_NAMES};
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Migration and seed state of the connected database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaStatus {
    /// Highest successfully applied migration version.
    pub migration_version: Option<i64>,
    /// Bundled migrations not yet applied.
    pub pending_migrations: usize,
    /// Every furnishing name the `furnished` filter relies on is present.
    pub furnishing_types_seeded: bool,
}

impl SchemaStatus {
    pub fn is_ready(&self) -> bool {
        self.pending_migrations == 0 && self.furnishing_types_seeded
    }
}

/// Inspect applied migrations and the furnishing seed rows.
pub async fn schema_status(pool: &DbPool) -> Result<SchemaStatus, sqlx::Error> {
    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await?;

    let pending_migrations = MIGRATOR
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .count();

    let names: Vec<&str> = FURNISHED_NAMES
        .iter()
        .chain(UNFURNISHED_NAMES)
        .copied()
        .collect();
    let seeded: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT furnishing_type) FROM furnishing_types WHERE furnishing_type = ANY($1)",
    )
    .bind(&names)
    .fetch_one(pool)
    .await?;

    Ok(SchemaStatus {
        migration_version: applied.last().copied(),
        pending_migrations,
        furnishing_types_seeded: seeded == names.len() as i64,
    })
}
