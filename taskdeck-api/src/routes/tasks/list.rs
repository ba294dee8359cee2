/// List tasks endpoint
///
/// Returns every task with its owner projection populated from the user
/// store. No pagination or filtering; the full list is materialized on
/// every call, in insertion order.
///
/// # Endpoint
///
/// `GET /tasks`
///
/// # Example Response
///
/// ```json
/// {
///   "tasks": [
///     {
///       "id": 1,
///       "title": "Review project requirements",
///       "description": null,
///       "status": "pending",
///       "user_id": 7,
///       "created_at": "2025-01-04T12:00:00Z",
///       "updated_at": "2025-01-04T12:00:00Z",
///       "user": { "id": 7, "name": "Jane Smith", "email": "jane@example.com", "role": "employee" }
///     }
///   ]
/// }
/// ```

use crate::app::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use serde::Serialize;
use taskdeck_shared::models::task::{Task, TaskWithOwner};

/// Task listing response
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    /// All tasks, each with its owner projection when assigned
    pub tasks: Vec<TaskWithOwner>,
}

/// List tasks endpoint handler
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<TasksResponse>> {
    let tasks = Task::list_with_owner(&state.db).await?;

    tracing::debug!(count = tasks.len(), "Listed tasks");

    Ok(Json(TasksResponse { tasks }))
}
