/// SQLite store handle
///
/// The store is opened once at startup and shared for the lifetime of the
/// process. By default the handle holds a single connection, so every
/// statement from every request is serialized through it.
///
/// Foreign keys are declared in the schema but their enforcement is switched
/// off: deleting a user or project never cascades and never fails because of
/// dependent rows, and a task may name an `assigned_to` user that does not
/// exist.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         path: "database/tasks.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use super::DbError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Configuration for the store handle
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`
    ///
    /// Default: `database/tasks.db`. Missing parent directories are created.
    pub path: String,

    /// Maximum number of connections held by the handle
    ///
    /// Default: 1. An in-memory database is always capped at one connection,
    /// since every extra connection would open a separate empty database.
    pub max_connections: u32,

    /// How long a statement waits on a locked database before failing (seconds)
    ///
    /// Default: 5
    pub busy_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "database/tasks.db".to_string(),
            max_connections: 1,
            busy_timeout_seconds: 5,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a throwaway in-memory store
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            ..Default::default()
        }
    }

    /// Whether this configuration targets an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}

/// Opens the store and verifies it answers queries
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory of the database file cannot be created
/// - The database cannot be opened
/// - The health check fails
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, DbError> {
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Opening SQLite database"
    );

    let busy_timeout = Duration::from_secs(config.busy_timeout_seconds);

    let (connect_options, max_connections) = if config.is_in_memory() {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(DbError::Connect)?
            .busy_timeout(busy_timeout)
            .foreign_keys(false);
        (options, 1)
    } else {
        ensure_parent_dir(&config.path).await?;
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout)
            .foreign_keys(false);
        (options, config.max_connections.max(1))
    };

    // Connections are never recycled: closing the only connection of an
    // in-memory database would discard its contents.
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await
        .map_err(DbError::Connect)?;

    health_check(&pool).await?;

    info!("Connected to SQLite database");
    Ok(pool)
}

async fn ensure_parent_dir(path: &str) -> Result<(), DbError> {
    let Some(parent) = Path::new(path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    debug!(dir = %parent.display(), "Ensuring database directory exists");
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| DbError::Directory {
            path: parent.display().to_string(),
            source,
        })
}

/// Executes `SELECT 1` against the store
///
/// # Errors
///
/// Returns an error if the query fails or returns an unexpected value
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Closes the store handle, waiting for in-flight statements to finish
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection");
    pool.close().await;
    info!("Database connection closed");
}
