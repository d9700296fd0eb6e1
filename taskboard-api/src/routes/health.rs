/// Root and health check endpoints
///
/// # Endpoints
///
/// ```text
/// GET /        -> service metadata
/// GET /health  -> liveness
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "uptime": 12.503,
///   "timestamp": "2025-01-03T12:00:00.000Z"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK" while the process is serving
    pub status: String,

    /// Seconds since startup
    pub uptime: f64,

    /// Current time, RFC 3339
    pub timestamp: String,
}

/// Paths of each resource collection
#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoints {
    pub users: String,
    pub projects: String,
    pub tasks: String,
    pub health: String,
}

/// Service metadata response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
    pub timestamp: String,
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        uptime: state.uptime_seconds(),
        timestamp: now_rfc3339(),
    })
}

/// Root handler describing the service
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Task Management API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: Endpoints {
            users: "/api/users".to_string(),
            projects: "/api/projects".to_string(),
            tasks: "/api/tasks".to_string(),
            health: "/health".to_string(),
        },
        timestamp: now_rfc3339(),
    })
}
