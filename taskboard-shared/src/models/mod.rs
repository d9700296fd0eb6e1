/// Database models for Taskboard
///
/// Each model carries its own single-statement operations as associated
/// functions that take the store handle explicitly. Nothing here checks
/// references between entities: callers decide which existence checks to
/// run before a write.
///
/// # Models
///
/// - `user`: People who own projects and get tasks assigned
/// - `project`: Groups of tasks owned by a user
/// - `task`: Units of work inside a project
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, NewUser};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let id = User::create(&pool, NewUser {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod user;
