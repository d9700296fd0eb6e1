/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Service metadata and health check
/// - `users`: User CRUD
/// - `projects`: Project CRUD (owner checked on create)
/// - `tasks`: Task CRUD (project checked on create)

pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
