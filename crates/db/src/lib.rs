//! Persistence layer for notebooks, notes, and tags.
//!
//! - [`models`]: row structs and request DTOs
//! - [`repositories`]: zero-sized SQLite repositories
//! - [`store`]: the [`store::NoteStore`] trait with SQLite and in-memory backends
//! - [`seed`]: sample data for a fresh store

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;

/// Embedded schema migrations from `crates/db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection options shared by every pool: create the file if missing,
/// WAL journaling, enforced foreign keys, and a busy timeout for writers.
fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5)))
}

/// Create a connection pool from a database URL (e.g. `sqlite://notebook.db`).
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options(database_url)?)
        .await
}

/// Create a private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
