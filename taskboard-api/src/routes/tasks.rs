/// Task endpoints
///
/// # Endpoints
///
/// - `GET /api/tasks` - List tasks with project title and assignee name
/// - `POST /api/tasks` - Create task in an existing project
/// - `PUT /api/tasks/:id` - Replace every mutable field
/// - `DELETE /api/tasks/:id` - Delete task
///
/// Unlike projects, which check their owner, `assigned_to` is stored as
/// given without checking that the user exists.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, JsonOrDefault, RequiredFields, ValidatedJson},
    response::{CreatedId, Envelope},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::models::{
    project::Project,
    task::{NewTask, Task, TaskChanges, TaskWithRelations, DEFAULT_PRIORITY, DEFAULT_STATUS},
};
use validator::Validate;

const MISSING_FIELDS: &str = "Title and project_id are required";

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,

    pub description: Option<String>,

    /// Must be an existing project; 0 counts as missing
    #[validate(required)]
    pub project_id: Option<i64>,

    /// Not checked against users
    pub assigned_to: Option<i64>,

    /// Defaults to "pending"
    pub status: Option<String>,

    /// Defaults to "medium"
    pub priority: Option<String>,

    /// Stored as given
    pub due_date: Option<String>,
}

impl RequiredFields for CreateTaskRequest {
    const MISSING_FIELDS: &'static str = MISSING_FIELDS;
}

impl CreateTaskRequest {
    fn into_new_task(self) -> Option<NewTask> {
        Some(NewTask {
            title: self.title?,
            description: self.description,
            project_id: self.project_id.filter(|id| *id != 0)?,
            assigned_to: self.assigned_to,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            priority: self.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            due_date: self.due_date,
        })
    }
}

/// Update task request (full replace; `project_id` cannot change)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<i64>,
    pub due_date: Option<String>,
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskChanges {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assigned_to: req.assigned_to,
            due_date: req.due_date,
        }
    }
}

/// List tasks
///
/// `project_title` and `assigned_to_name` are null when the referenced rows
/// are missing.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<TaskWithRelations>>> {
    let tasks = Task::list_with_relations(&state.db)
        .await
        .map_err(ApiError::database("Failed to get tasks"))?;

    Ok(Envelope::list(tasks))
}

/// Create task
///
/// The project is looked up first; the insert follows as a separate
/// statement.
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// {
///   "title": "T1",
///   "project_id": 1,
///   "assigned_to": 2,
///   "priority": "high",
///   "due_date": "2026-01-31T17:00:00Z"
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// { "success": true, "message": "Task created successfully", "taskId": 1 }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: title or project_id missing
/// - `404 Not Found`: project does not exist ("Project not found")
/// - `500 Internal Server Error`: store failure
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<()>>)> {
    let new_task = req
        .into_new_task()
        .ok_or_else(|| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;

    let project_exists = Project::exists(&state.db, new_task.project_id)
        .await
        .map_err(ApiError::database("Database error"))?;

    if !project_exists {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let project_id = new_task.project_id;
    let id = Task::create(&state.db, new_task)
        .await
        .map_err(ApiError::database("Failed to create task"))?;

    tracing::info!(task_id = id, project_id, "Task created");

    Ok(Envelope::created(
        "Task created successfully",
        CreatedId::Task(id),
    ))
}

/// Update task
///
/// # Errors
///
/// - `404 Not Found`: unknown id
/// - `500 Internal Server Error`: store failure or missing title
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    JsonOrDefault(req): JsonOrDefault<UpdateTaskRequest>,
) -> ApiResult<Envelope<()>> {
    let exists = Task::exists(&state.db, id)
        .await
        .map_err(ApiError::database("Database error"))?;

    if !exists {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Task::update(&state.db, id, req.into())
        .await
        .map_err(ApiError::database("Failed to update task"))?;

    Ok(Envelope::message("Task updated successfully"))
}

/// Delete task
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<()>> {
    let deleted = Task::delete(&state.db, id)
        .await
        .map_err(ApiError::database("Failed to delete task"))?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(task_id = id, "Task deleted");
    Ok(Envelope::message("Task deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_create() {
        let req: CreateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "T1", "project_id": 1 }))
                .unwrap();
        assert!(req.validate().is_ok());

        let task = req.into_new_task().unwrap();
        assert_eq!(task.status, "pending");
        assert_eq!(task.priority, "medium");
        assert_eq!(task.assigned_to, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_missing_project_fails_validation() {
        let req: CreateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "T1" })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_due_date_is_kept_verbatim() {
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "title": "T1",
            "project_id": 1,
            "due_date": "2026-01-31"
        }))
        .unwrap();

        let task = req.into_new_task().unwrap();
        assert_eq!(task.due_date.as_deref(), Some("2026-01-31"));
    }

    #[test]
    fn test_zero_project_is_missing_but_negative_is_not() {
        let zero: CreateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "T1", "project_id": 0 }))
                .unwrap();
        assert!(zero.into_new_task().is_none());

        let negative: CreateTaskRequest =
            serde_json::from_value(serde_json::json!({ "title": "T1", "project_id": -5 }))
                .unwrap();
        assert!(negative.validate().is_ok());
        assert_eq!(negative.into_new_task().unwrap().project_id, -5);
    }
}
