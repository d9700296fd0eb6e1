/// Project model and database operations
///
/// A project is owned by the user in `user_id`. The owner is checked by the
/// caller when the project is created and never again: deleting the owner
/// orphans the project, and the owner cannot be changed afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     description TEXT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     status TEXT DEFAULT 'active',
///     created_at DATETIME DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Status given to a project created without one
pub const DEFAULT_STATUS: &str = "active";

/// Project row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,

    /// Owner id; may point at a user that has since been deleted
    pub user_id: i64,

    /// Free text. NULL once an update omits it.
    pub status: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Project row joined with its owner's name
///
/// `owner_name` is None when the owner no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,

    pub owner_name: Option<String>,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub status: String,
}

/// Replacement values for an existing project
///
/// All three columns are overwritten, including with NULL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl Project {
    /// Lists every project with its owner's name, newest first
    pub async fn list_with_owner(pool: &SqlitePool) -> Result<Vec<ProjectWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, ProjectWithOwner>(
            r#"
            SELECT p.id, p.title, p.description, p.user_id, p.status, p.created_at,
                   u.name AS owner_name
            FROM projects p
            LEFT JOIN users u ON p.user_id = u.id
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Finds a project by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, user_id, status, created_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Checks whether a project with this id exists
    ///
    /// Not atomic with any write issued afterwards.
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }

    /// Inserts a project and returns its generated id
    ///
    /// The owner is not checked here.
    pub async fn create(pool: &SqlitePool, data: NewProject) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO projects (title, description, user_id, status) VALUES (?, ?, ?, ?)",
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .bind(data.status)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites `title`, `description` and `status`
    ///
    /// Returns false if the id is unknown.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: ProjectChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET title = ?, description = ?, status = ? WHERE id = ?",
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a project by id
    ///
    /// Tasks in the project are kept. Returns false if the id is unknown.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all projects
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
