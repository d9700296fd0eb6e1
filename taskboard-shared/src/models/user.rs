/// User model and database operations
///
/// Users own projects and can be assigned tasks. Deleting a user leaves any
/// projects and tasks that reference it in place.
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
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, NewUser};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let id = User::create(&pool, NewUser {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
/// }).await?;
///
/// let found = User::find_by_id(&pool, id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-generated id, never reused
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// When the row was inserted
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Replacement values for an existing user
///
/// Both columns are written on every update. A `None` is written as NULL,
/// which the NOT NULL constraints on `name` and `email` reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Lists every user, newest first
    ///
    /// Rows created within the same second are ordered by descending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Finds a user by id
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Checks whether a user with this id exists
    ///
    /// This is a standalone round-trip. Nothing prevents the user from being
    /// deleted between this check and a write that depends on it.
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }

    /// Inserts a user
    ///
    /// # Returns
    ///
    /// The generated id
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already taken (unique constraint violation)
    /// - The query fails
    pub async fn create(pool: &SqlitePool, data: NewUser) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(data.name)
            .bind(data.email)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites `name` and `email`
    ///
    /// # Returns
    ///
    /// True if a row was updated, false if the id is unknown
    ///
    /// # Errors
    ///
    /// Returns an error if a value is missing, the new email collides with
    /// another user, or the query fails
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UserChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(data.name)
            .bind(data.email)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by id
    ///
    /// Projects owned by the user and tasks assigned to it are left as they
    /// are, pointing at an id that no longer exists.
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if it didn't exist
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
