/// Project endpoints
///
/// # Endpoints
///
/// - `GET /api/projects` - List projects with owner name
/// - `POST /api/projects` - Create project for an existing user
/// - `PUT /api/projects/:id` - Replace title, description and status
/// - `DELETE /api/projects/:id` - Delete project (its tasks are kept)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, JsonOrDefault, RequiredFields, ValidatedJson},
    response::{CreatedId, Envelope},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{
    project::{NewProject, Project, ProjectChanges, ProjectWithOwner, DEFAULT_STATUS},
    user::User,
};
use validator::Validate;

const MISSING_FIELDS: &str = "Title and user_id are required";

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,

    pub description: Option<String>,

    /// Owner; must be an existing user. 0 counts as missing
    #[validate(required)]
    pub user_id: Option<i64>,

    /// Defaults to "active"
    pub status: Option<String>,
}

impl RequiredFields for CreateProjectRequest {
    const MISSING_FIELDS: &'static str = MISSING_FIELDS;
}

impl CreateProjectRequest {
    fn into_new_project(self) -> Option<NewProject> {
        Some(NewProject {
            title: self.title?,
            description: self.description,
            user_id: self.user_id.filter(|id| *id != 0)?,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }
}

/// Update project request
///
/// The owner cannot be changed; a `user_id` in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// List projects with their owner's name
///
/// `owner_name` is null for projects whose owner was deleted.
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<ProjectWithOwner>>> {
    let projects = Project::list_with_owner(&state.db)
        .await
        .map_err(ApiError::database("Failed to get projects"))?;

    Ok(Envelope::list(projects))
}

/// Create project
///
/// Two round-trips: the owner is looked up first, and only if found is the
/// insert issued. The owner can still be deleted in between.
///
/// # Endpoint
///
/// ```text
/// POST /api/projects
/// Content-Type: application/json
///
/// { "title": "P1", "description": "First project", "user_id": 1 }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "success": true, "message": "Project created successfully", "projectId": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: title or user_id missing
/// - `404 Not Found`: owner does not exist ("User not found")
/// - `500 Internal Server Error`: store failure
pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<()>>)> {
    let new_project = req
        .into_new_project()
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;

    let owner_exists = User::exists(&state.db, new_project.user_id)
        .await
        .map_err(ApiError::database("Database error"))?;

    if !owner_exists {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let user_id = new_project.user_id;
    let id = Project::create(&state.db, new_project)
        .await
        .map_err(ApiError::database("Failed to create project"))?;

    tracing::info!(project_id = id, user_id, "Project created");

    Ok(Envelope::created(
        "Project created successfully",
        CreatedId::Project(id),
    ))
}

/// Update project
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `500 Internal Server Error`: store failure or missing title
pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    JsonOrDefault(req): JsonOrDefault<UpdateProjectRequest>,
) -> ApiResult<Envelope<()>> {
    let exists = Project::exists(&state.db, id)
        .await
        .map_err(ApiError::database("Database error"))?;

    if !exists {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Project::update(
        &state.db,
        id,
        ProjectChanges {
            title: req.title,
            description: req.description,
            status: req.status,
        },
    )
    .await
    .map_err(ApiError::database("Failed to update project"))?;

    Ok(Envelope::message("Project updated successfully"))
}

/// Delete project
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `500 Internal Server Error`: store failure
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<()>> {
    let deleted = Project::delete(&state.db, id)
        .await
        .map_err(ApiError::database("Failed to delete project"))?;

    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = id, "Project deleted");
    Ok(Envelope::message("Project deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateProjectRequest {
            title: Some("P1".to_string()),
            description: None,
            user_id: Some(1),
            status: None,
        };
        assert!(valid.validate().is_ok());

        let no_owner = CreateProjectRequest {
            user_id: None,
            ..valid_request()
        };
        assert!(no_owner.validate().is_err());

        let zero_owner = CreateProjectRequest {
            user_id: Some(0),
            ..valid_request()
        };
        assert!(zero_owner.into_new_project().is_none());

        let negative_owner = CreateProjectRequest {
            user_id: Some(-1),
            ..valid_request()
        };
        assert!(negative_owner.validate().is_ok());

        let empty_title = CreateProjectRequest {
            title: Some(String::new()),
            ..valid_request()
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_status_defaults_to_active() {
        let project = valid_request().into_new_project().unwrap();
        assert_eq!(project.status, "active");

        let project = CreateProjectRequest {
            status: Some("archived".to_string()),
            ..valid_request()
        }
        .into_new_project()
        .unwrap();
        assert_eq!(project.status, "archived");
    }

    fn valid_request() -> CreateProjectRequest {
        CreateProjectRequest {
            title: Some("P1".to_string()),
            description: None,
            user_id: Some(1),
            status: None,
        }
    }
}
