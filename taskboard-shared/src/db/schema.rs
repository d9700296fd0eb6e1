/// Schema initialization
///
/// Creates the `users`, `projects` and `tasks` tables if they are absent.
/// Running it again against an existing database is a no-op, so it is safe
/// to call on every startup. There is no migration history: the statements
/// below are the whole schema.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     email TEXT UNIQUE NOT NULL,
///     created_at DATETIME DEFAULT CURRENT_TIMESTAMP
/// );
///
/// CREATE TABLE projects (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     description TEXT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     status TEXT DEFAULT 'active',
///     created_at DATETIME DEFAULT CURRENT_TIMESTAMP
/// );
///
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     description TEXT,
///     project_id INTEGER NOT NULL REFERENCES projects(id),
///     assigned_to INTEGER REFERENCES users(id),
///     status TEXT DEFAULT 'pending',
///     priority TEXT DEFAULT 'medium',
///     due_date DATETIME,
///     created_at DATETIME DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use super::DbError;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Table names in creation order
pub const TABLES: [&str; 3] = ["users", "projects", "tasks"];

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT UNIQUE NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        user_id INTEGER NOT NULL,
        status TEXT DEFAULT 'active',
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users (id)
    )
"#;

const CREATE_TASKS: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        project_id INTEGER NOT NULL,
        assigned_to INTEGER,
        status TEXT DEFAULT 'pending',
        priority TEXT DEFAULT 'medium',
        due_date DATETIME,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (project_id) REFERENCES projects (id),
        FOREIGN KEY (assigned_to) REFERENCES users (id)
    )
"#;

/// Which of the expected tables exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Tables found in the database
    pub present: Vec<&'static str>,

    /// Tables that still need to be created
    pub missing: Vec<&'static str>,
}

impl SchemaStatus {
    /// True when every table exists
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Creates any missing tables
///
/// Tables are created in dependency order. The first failure aborts
/// initialization and is returned to the caller.
///
/// # Errors
///
/// Returns `DbError::CreateTable` naming the table that could not be created
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), DbError> {
    let statements = [CREATE_USERS, CREATE_PROJECTS, CREATE_TASKS];

    for (table, statement) in TABLES.into_iter().zip(statements) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|source| DbError::CreateTable { table, source })?;
        info!(table, "Table ready");
    }

    Ok(())
}

/// Reports which tables are present in `sqlite_master`
pub async fn schema_status(pool: &SqlitePool) -> Result<SchemaStatus, sqlx::Error> {
    let mut present = Vec::new();
    let mut missing = Vec::new();

    for table in TABLES {
        let found: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if found > 0 {
            present.push(table);
        } else {
            missing.push(table);
        }
    }

    debug!(?present, ?missing, "Schema status retrieved");
    Ok(SchemaStatus { present, missing })
}

/// Initializes the schema and confirms every table exists afterwards
///
/// This is the startup entry point: any error means the process must not
/// serve requests.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<SchemaStatus, DbError> {
    initialize_schema(pool).await?;

    let status = schema_status(pool).await?;
    if !status.is_complete() {
        return Err(DbError::IncompleteSchema(status.missing));
    }

    Ok(status)
}
