//! # Taskboard Shared Library
//!
//! Storage layer shared by the Taskboard API server and its tests.
//!
//! ## Module Organization
//!
//! - `db`: SQLite store handle and idempotent schema initialization
//! - `models`: Users, projects and tasks with their single-statement
//!   repository operations

pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
