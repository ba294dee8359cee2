/// Delete task endpoint
///
/// Removal is unconditional: no cascade checks and no soft delete,
/// since nothing else references a task.
///
/// # Endpoint
///
/// `DELETE /tasks/:id`
///
/// Returns 204 No Content on success, 404 when the task does not exist.
/// Deleting the same ID twice therefore yields 204 then 404.

use crate::app::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use taskdeck_shared::models::task::Task;

/// Delete task endpoint handler
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
