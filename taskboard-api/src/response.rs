/// Success envelope
///
/// Every successful resource response has the shape
/// `{"success": true, "data"?, "count"?, "message"?}`; create responses add
/// the generated id under `userId`, `projectId` or `taskId`. Failures are
/// rendered by `ApiError`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Id of a freshly created row, keyed by entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreatedId {
    #[serde(rename = "userId")]
    User(i64),
    #[serde(rename = "projectId")]
    Project(i64),
    #[serde(rename = "taskId")]
    Task(i64),
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Flattened to nothing when None
    #[serde(flatten)]
    pub created: Option<CreatedId>,
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// All rows of a listing with their count
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            message: None,
            created: None,
        }
    }
}

impl Envelope<()> {
    /// Bare success with a human-readable message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            message: Some(message.into()),
            created: None,
        }
    }

    /// 201 response carrying the generated id
    pub fn created(message: impl Into<String>, id: CreatedId) -> (StatusCode, Json<Self>) {
        let mut envelope = Self::message(message);
        envelope.created = Some(id);
        (StatusCode::CREATED, Json(envelope))
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
