/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`. Failures render as the envelope
/// `{"success": false, "error": "<message>"}` with the matching status code.
/// Store failures are logged with their cause and reach the client only as
/// the operation's generic message.
///
/// # Example
///
/// ```
/// use taskboard_api::error::{ApiError, ApiResult};
///
/// fn require_title(title: Option<&str>) -> ApiResult<&str> {
///     title.ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))
/// }
///
/// assert!(require_title(None).is_err());
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Target or referenced row does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store failed (500)
    ///
    /// `message` is what the client sees; `source` is only logged.
    #[error("{message}: {source}")]
    Database {
        message: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with its client message
    ///
    /// ```ignore
    /// User::create(&state.db, data)
    ///     .await
    ///     .map_err(ApiError::database("Failed to create user"))?;
    /// ```
    pub fn database(message: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| ApiError::Database { message, source }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Database { message, source } => {
                // Log the cause but don't expose it to clients
                tracing::error!(error = %source, "{}", message);
                message.to_string()
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}

/// Malformed JSON, wrong content type, or a body that doesn't fit the request type
///
/// The deserializer's detail is logged, not returned.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        let message = match rejection {
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON body",
            _ => "Invalid request body",
        };
        ApiError::BadRequest(message.to_string())
    }
}

/// Path segment that doesn't parse, e.g. a non-numeric id
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected path parameters");
        ApiError::BadRequest("Invalid id".to_string())
    }
}
