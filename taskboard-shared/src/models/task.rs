/// Task model and database operations
///
/// Tasks belong to a project and may be assigned to a user. Neither
/// reference is checked here; `assigned_to` is never checked anywhere.
///
/// `due_date` is kept as the text the client sent (`2026-01-31`,
/// `2026-01-31T17:00:00Z`, ...) and read back unchanged.
///
/// # Schema
///
/// ```sql
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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

pub const DEFAULT_STATUS: &str = "pending";
pub const DEFAULT_PRIORITY: &str = "medium";

/// Task row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub assigned_to: Option<i64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Task row joined with its project title and assignee name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithRelations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub task: Task,

    pub project_title: Option<String>,
    pub assigned_to_name: Option<String>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub assigned_to: Option<i64>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
}

/// Replacement values for an existing task (full replace, `project_id` excluded)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<i64>,
    pub due_date: Option<String>,
}

impl Task {
    /// Lists every task with project title and assignee name, newest first
    pub async fn list_with_relations(
        pool: &SqlitePool,
    ) -> Result<Vec<TaskWithRelations>, sqlx::Error> {
        sqlx::query_as::<_, TaskWithRelations>(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.assigned_to,
                   t.status, t.priority, CAST(t.due_date AS TEXT) AS due_date, t.created_at,
                   p.title AS project_title,
                   u.name AS assigned_to_name
            FROM tasks t
            LEFT JOIN projects p ON t.project_id = p.id
            LEFT JOIN users u ON t.assigned_to = u.id
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, project_id, assigned_to,
                   status, priority, CAST(due_date AS TEXT) AS due_date, created_at
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }

    /// Inserts a task and returns its generated id
    pub async fn create(pool: &SqlitePool, data: NewTask) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks
                (title, description, project_id, assigned_to, status, priority, due_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites every mutable column; returns false if the id is unknown
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: TaskChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = ?, description = ?, status = ?, priority = ?,
                assigned_to = ?, due_date = ?
            WHERE id = ?
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assigned_to)
        .bind(data.due_date)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
