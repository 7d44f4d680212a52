//! Database Module
//!
//! Handles the SQLite connection pool, migrations and the schema descriptor

pub mod mapper;
pub mod repository;
pub mod schema;

pub use mapper::{Record, RecordKey, RecordMapper, SqlValue};
pub use schema::{Schema, TableSchema};

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// 数据库服务: SQLite 连接池与表结构描述
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
    pub schema: Arc<Schema>,
}

impl DbService {
    /// Open (or create) the database at `database_url`, e.g. `sqlite:comanda.db`
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        // References stay declared but unenforced; see migrations/0001_initial.sql
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::from_pool(pool).await
    }

    /// Private in-memory database, used by tests
    ///
    /// A single connection that never expires: the data lives as long as it does.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database url: {e}")))?
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        let schema = Schema::load(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read schema: {e}")))?;

        Ok(Self {
            pool,
            schema: Arc::new(schema),
        })
    }
}
