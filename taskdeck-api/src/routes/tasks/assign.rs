/// Assign task endpoint
///
/// Sets the owner of a task, separate from the generic update. The
/// operation always overwrites any prior owner; there is no "already
/// assigned" guard, and assigning the same user twice leaves the task in
/// the same state.
///
/// # Endpoint
///
/// `POST /tasks/:id/assign`
///
/// # Example Request
///
/// ```json
/// { "user_id": 7 }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Task assigned successfully",
///   "task": {
///     "id": 42,
///     "user_id": 7,
///     "user": { "id": 7, "name": "Jane Smith", "email": "jane@example.com", "role": "employee" }
///   }
/// }
/// ```

use super::{attach_owner, ensure_user_exists};
use crate::app::AppState;
use crate::error::{ApiError, ValidationErrorDetail};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::task::{Task, TaskWithOwner};

/// Assign task request
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTaskRequest {
    /// User to assign; required and must reference an existing user
    pub user_id: Option<i64>,
}

/// Assign task response
#[derive(Debug, Serialize)]
pub struct AssignTaskResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The updated task with its owner projection
    pub task: TaskWithOwner,
}

/// Assign task endpoint handler
///
/// # Errors
///
/// - 404 Not Found: no task with this ID
/// - 422 Unprocessable Entity: `user_id` missing or references no user
/// - 500 Internal Server Error: database error
pub async fn assign_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AssignTaskRequest>,
) -> Result<Json<AssignTaskResponse>, ApiError> {
    let user_id = request.user_id.ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "user_id",
            "user_id is required",
        )])
    })?;

    ensure_user_exists(&state.db, user_id).await?;

    let task = Task::assign(&state.db, id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::info!(task_id = id, user_id, "Task assigned");

    let task = attach_owner(&state.db, task).await?;

    Ok(Json(AssignTaskResponse {
        message: "Task assigned successfully".to_string(),
        task,
    }))
}
