/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: SQLite store handle with a startup health check
/// - `schema`: Create-if-absent initialization of the three tables
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::schema::initialize_schema;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::default()).await?;
///     initialize_schema(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;

/// Errors raised while opening or preparing the store
///
/// Any of these during startup is fatal: the server must not accept
/// traffic against a store it could not open or a schema it could not create.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to prepare database directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to create table {table}: {source}")]
    CreateTable {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Schema incomplete, missing tables: {0:?}")]
    IncompleteSchema(Vec<&'static str>),

    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
}
