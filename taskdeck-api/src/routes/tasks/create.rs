/// Create task endpoint
///
/// # Endpoint
///
/// `POST /tasks`
///
/// # Example Request
///
/// ```json
/// {
///   "title": "Write API documentation",
///   "description": "Document all endpoints with examples",
///   "status": "pending",
///   "user_id": 7
/// }
/// ```
///
/// # Example Response
///
/// Returns 201 Created with the persisted task. The `user` key is only
/// present when the task was created with an owner.
///
/// ```json
/// {
///   "task": {
///     "id": 42,
///     "title": "Write API documentation",
///     "status": "pending",
///     "user_id": 7,
///     "user": { "id": 7, "name": "Jane Smith", "email": "jane@example.com", "role": "employee" }
///   }
/// }
/// ```

use super::{attach_owner, ensure_user_exists, parse_status, TaskResponse};
use crate::app::AppState;
use crate::error::ApiError;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskdeck_shared::models::task::{CreateTask, Task};
use validator::Validate;

/// Create task request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status; must be one of the three wire values
    pub status: String,

    /// Optional owner; must reference an existing user when set
    pub user_id: Option<i64>,
}

/// Create task endpoint handler
///
/// # Validation
///
/// - title: required, 1-255 characters
/// - status: required, one of pending / in_progress / done
/// - user_id: optional, must reference an existing user when non-null
///
/// # Errors
///
/// - 422 Unprocessable Entity: validation failure (including a `user_id`
///   that references no user)
/// - 500 Internal Server Error: database error
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    request.validate()?;

    let status = parse_status(&request.status)?;

    if let Some(user_id) = request.user_id {
        ensure_user_exists(&state.db, user_id).await?;
    }

    tracing::info!(
        title = %request.title,
        status = %status.as_str(),
        user_id = ?request.user_id,
        "Creating new task"
    );

    let task = Task::create(
        &state.db,
        CreateTask {
            title: request.title,
            description: request.description,
            status,
            user_id: request.user_id,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, "Task created successfully");

    let task = attach_owner(&state.db, task).await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateTaskRequest {
        CreateTaskRequest {
            title: "Setup development environment".to_string(),
            description: Some("Install and configure all necessary tools".to_string()),
            status: "pending".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let mut request = valid_request();
        request.title = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_overlong_title_fails_validation() {
        let mut request = valid_request();
        request.title = "a".repeat(256);
        assert!(request.validate().is_err());

        // 255 is still fine
        request.title = "a".repeat(255);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_deserializes_optional_fields() {
        let request: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "title": "Create database schema",
            "status": "in_progress"
        }))
        .unwrap();

        assert_eq!(request.description, None);
        assert_eq!(request.user_id, None);
        assert_eq!(request.status, "in_progress");
    }

    #[test]
    fn test_request_requires_status() {
        let result = serde_json::from_value::<CreateTaskRequest>(serde_json::json!({
            "title": "Create database schema"
        }));

        assert!(result.is_err());
    }
}
