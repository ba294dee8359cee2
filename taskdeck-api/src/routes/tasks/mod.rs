/// Task endpoints
///
/// CRUD and assignment over the task store, one handler per file:
///
/// - `list`: GET /tasks
/// - `create`: POST /tasks
/// - `update`: PUT/PATCH /tasks/:id
/// - `delete`: DELETE /tasks/:id
/// - `assign`: POST /tasks/:id/assign
///
/// Every write that introduces an owner reference validates the user's
/// existence first; responses carrying a task attach the owner projection
/// whenever the task is assigned.

pub mod assign;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

pub use assign::assign_task;
pub use create::create_task;
pub use delete::delete_task;
pub use list::list_tasks;
pub use update::update_task;

use crate::error::{ApiError, ValidationErrorDetail};
use serde::Serialize;
use sqlx::PgPool;
use taskdeck_shared::models::task::{Task, TaskStatus, TaskWithOwner};
use taskdeck_shared::models::user::User;

/// Response envelope for a single task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task, with owner projection when assigned
    pub task: TaskWithOwner,
}

/// Parses a wire status string, mapping failures to a field-level error
pub(crate) fn parse_status(s: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::parse(s).ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "status",
            "Status must be one of pending, in_progress, done",
        )])
    })
}

/// Validates that an owner reference points at an existing user
///
/// Missing users surface as a validation failure on `user_id`, not as a
/// distinct integrity error.
pub(crate) async fn ensure_user_exists(db: &PgPool, user_id: i64) -> Result<(), ApiError> {
    if User::exists(db, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "user_id",
            format!("User {} does not exist", user_id),
        )]))
    }
}

/// Attaches the owner projection to a task when it has one
pub(crate) async fn attach_owner(db: &PgPool, task: Task) -> Result<TaskWithOwner, ApiError> {
    let owner = match task.user_id {
        Some(user_id) => User::find_summary(db, user_id).await?,
        None => None,
    };

    Ok(task.with_owner(owner))
}
