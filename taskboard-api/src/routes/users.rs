/// User endpoints
///
/// # Endpoints
///
/// - `GET /api/users` - List users, newest first
/// - `POST /api/users` - Create user
/// - `PUT /api/users/:id` - Replace name and email
/// - `DELETE /api/users/:id` - Delete user (dependent projects are kept)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, JsonOrDefault, RequiredFields, ValidatedJson},
    response::{CreatedId, Envelope},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::user::{NewUser, User, UserChanges};
use validator::Validate;

const MISSING_FIELDS: &str = "Name and email are required";

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,
}

impl RequiredFields for CreateUserRequest {
    const MISSING_FIELDS: &'static str = MISSING_FIELDS;
}

impl CreateUserRequest {
    fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            name: self.name?,
            email: self.email?,
        })
    }
}

/// Update user request
///
/// Both fields are written as given; an omitted field becomes NULL and the
/// store rejects it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// List users
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 1, "name": "Ana", "email": "ana@x.com", "created_at": "2025-01-03T12:00:00Z" }
///   ],
///   "count": 1
/// }
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Envelope<Vec<User>>> {
    let users = User::list(&state.db)
        .await
        .map_err(ApiError::database("Failed to get users"))?;

    Ok(Envelope::list(users))
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// { "name": "Ana", "email": "ana@x.com" }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "success": true, "message": "User created successfully", "userId": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: name or email missing
/// - `500 Internal Server Error`: store failure, including a duplicate email
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<()>>)> {
    let new_user = req
        .into_new_user()
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;

    let id = User::create(&state.db, new_user)
        .await
        .map_err(ApiError::database("Failed to create user"))?;

    tracing::info!(user_id = id, "User created");

    Ok(Envelope::created(
        "User created successfully",
        CreatedId::User(id),
    ))
}

/// Update user
///
/// Checks the user exists, then overwrites both columns in a second
/// statement. A request without a JSON body is treated as `{}`.
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `500 Internal Server Error`: store failure, a missing field, or an email
///   already used by another user
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    JsonOrDefault(req): JsonOrDefault<UpdateUserRequest>,
) -> ApiResult<Envelope<()>> {
    let exists = User::exists(&state.db, id)
        .await
        .map_err(ApiError::database("Database error"))?;

    if !exists {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    User::update(
        &state.db,
        id,
        UserChanges {
            name: req.name,
            email: req.email,
        },
    )
    .await
    .map_err(ApiError::database("Failed to update user"))?;

    Ok(Envelope::message("User updated successfully"))
}

/// Delete user
///
/// Projects and tasks referencing the user are not touched.
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `500 Internal Server Error`: store failure
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<()>> {
    let deleted = User::delete(&state.db, id)
        .await
        .map_err(ApiError::database("Failed to delete user"))?;

    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(Envelope::message("User deleted successfully"))
}
