//! Database module for persistent storage.
//!
//! Provides async SQLite database access using SQLx for the tracked player
//! registry. Schema lives in `migrations/` and is applied on connect.

mod players;

pub use players::SqlitePlayerRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Database setup errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("database integrity check failed: {0}")]
    Integrity(String),
}

/// Database handle with connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connection acquire timeout.
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Maximum time a connection can remain idle before being closed.
    const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let pool = if path == ":memory:" {
            Self::memdb_pool_options()
                .connect_with(Self::memdb_connect_options())
                .await?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }

            // WAL lets list reads proceed while a track insert is in flight.
            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);

            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .idle_timeout(Some(Self::IDLE_TIMEOUT))
                .test_before_acquire(true)
                .connect_with(options)
                .await?
        };

        info!(path = %path, "Database connected");

        Self::from_pool(pool).await
    }

    /// Every call names its own shared-cache database so parallel tests
    /// never see each other's rows.
    fn memdb_connect_options() -> SqliteConnectOptions {
        let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
        let memdb_uri = format!(
            "file:faceit-tracker-memdb-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            id
        );

        SqliteConnectOptions::new()
            .filename(&memdb_uri)
            .shared_cache(true)
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
    }

    /// The in-memory database lives only as long as a connection is open,
    /// so the single connection is never reaped or recycled.
    fn memdb_pool_options() -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Self::ACQUIRE_TIMEOUT)
            .idle_timeout(None)
            .max_lifetime(None)
            .test_before_acquire(true)
    }

    /// Apply migrations and verify integrity on an open pool.
    async fn from_pool(pool: SqlitePool) -> Result<Self, DbError> {
        Self::run_migrations(&pool).await?;

        let integrity_result: String = sqlx::query_scalar("PRAGMA integrity_check")
            .fetch_one(&pool)
            .await?;

        if integrity_result != "ok" {
            tracing::error!(
                integrity_check = %integrity_result,
                "Database integrity check FAILED - corruption detected!"
            );
            return Err(DbError::Integrity(integrity_result));
        }

        Ok(Self { pool })
    }

    /// Run embedded migrations.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations checked/applied");
        Ok(())
    }

    /// Get the player repository.
    pub fn players(&self) -> SqlitePlayerRepository {
        SqlitePlayerRepository::new(self.pool.clone())
    }
}
