/// Update task endpoint
///
/// Applies a partial update: every field is optional, and only the fields
/// present in the request body are written. A field that is present must
/// satisfy the same constraints as on creation.
///
/// Absent and null are different things here. `{"description": null}`
/// clears the description and `{"user_id": null}` unassigns the task,
/// while leaving either key out entirely keeps the stored value. The
/// request type models this with a double `Option` per field.
///
/// # Endpoint
///
/// `PUT /tasks/:id` or `PATCH /tasks/:id`
///
/// # Example Request
///
/// ```json
/// { "status": "done" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "task": {
///     "id": 42,
///     "title": "Write API documentation",
///     "status": "done",
///     "user_id": 7,
///     "user": { "id": 7, "name": "Jane Smith", "email": "jane@example.com", "role": "employee" }
///   }
/// }
/// ```

use super::{attach_owner, ensure_user_exists, TaskResponse};
use crate::app::AppState;
use crate::error::{ApiError, ValidationErrorDetail};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Deserializer};
use taskdeck_shared::models::task::{Task, TaskPatch, TaskStatus};

/// Marks a field as present, preserving an explicit null as `Some(None)`
fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Update task request
///
/// Outer `None` = key absent, `Some(None)` = key present and null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title (null is rejected; the title is required when present)
    #[serde(default, deserialize_with = "patch_field")]
    pub title: Option<Option<String>>,

    /// New description (null clears it)
    #[serde(default, deserialize_with = "patch_field")]
    pub description: Option<Option<String>>,

    /// New status (null is rejected)
    #[serde(default, deserialize_with = "patch_field")]
    pub status: Option<Option<String>>,

    /// New owner (null unassigns)
    #[serde(default, deserialize_with = "patch_field")]
    pub user_id: Option<Option<i64>>,
}

/// Validates the request and converts it into a store patch
///
/// Collects every field failure before reporting, so a response carries
/// the full set of problems at once.
fn build_patch(request: UpdateTaskRequest) -> Result<TaskPatch, ApiError> {
    let mut details = Vec::new();
    let mut patch = TaskPatch::default();

    match request.title {
        None => {}
        Some(None) => details.push(ValidationErrorDetail::new("title", "Title must not be null")),
        Some(Some(title)) => {
            let len = title.chars().count();
            if len == 0 || len > 255 {
                details.push(ValidationErrorDetail::new(
                    "title",
                    "Title must be between 1 and 255 characters",
                ));
            } else {
                patch.title = Some(title);
            }
        }
    }

    match request.status {
        None => {}
        Some(None) => details.push(ValidationErrorDetail::new("status", "Status must not be null")),
        Some(Some(status)) => match TaskStatus::parse(&status) {
            Some(status) => patch.status = Some(status),
            None => details.push(ValidationErrorDetail::new(
                "status",
                "Status must be one of pending, in_progress, done",
            )),
        },
    }

    patch.description = request.description;
    patch.user_id = request.user_id;

    if details.is_empty() {
        Ok(patch)
    } else {
        Err(ApiError::ValidationError(details))
    }
}

/// Update task endpoint handler
///
/// # Errors
///
/// - 404 Not Found: no task with this ID
/// - 422 Unprocessable Entity: a present field violates its constraints,
///   or `user_id` references no user
/// - 500 Internal Server Error: database error
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let patch = build_patch(request)?;

    if let Some(Some(user_id)) = patch.user_id {
        ensure_user_exists(&state.db, user_id).await?;
    }

    tracing::info!(task_id = id, "Updating task");

    let task = Task::update(&state.db, id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = attach_owner(&state.db, task).await?;

    Ok(Json(TaskResponse { task }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> UpdateTaskRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_fields_deserialize_as_outer_none() {
        let request = from_json(serde_json::json!({}));

        assert!(request.title.is_none());
        assert!(request.description.is_none());
        assert!(request.status.is_none());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_null_fields_deserialize_as_present_null() {
        let request = from_json(serde_json::json!({
            "description": null,
            "user_id": null
        }));

        assert_eq!(request.description, Some(None));
        assert_eq!(request.user_id, Some(None));
        assert!(request.title.is_none());
    }

    #[test]
    fn test_value_fields_deserialize_as_present_value() {
        let request = from_json(serde_json::json!({
            "title": "Optimize database queries",
            "status": "in_progress",
            "user_id": 3
        }));

        assert_eq!(request.title, Some(Some("Optimize database queries".to_string())));
        assert_eq!(request.status, Some(Some("in_progress".to_string())));
        assert_eq!(request.user_id, Some(Some(3)));
    }

    #[test]
    fn test_empty_request_builds_empty_patch() {
        let patch = build_patch(UpdateTaskRequest::default()).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_null_description_clears_and_null_user_unassigns() {
        let patch = build_patch(from_json(serde_json::json!({
            "description": null,
            "user_id": null
        })))
        .unwrap();

        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.user_id, Some(None));
        assert!(patch.title.is_none());
        assert!(patch.status.is_none());
    }

    #[test]
    fn test_null_title_is_rejected() {
        let err = build_patch(from_json(serde_json::json!({ "title": null }))).unwrap_err();

        match err {
            ApiError::ValidationError(details) => assert_eq!(details[0].field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overlong_title_is_rejected() {
        let err = build_patch(from_json(serde_json::json!({
            "title": "a".repeat(256)
        })))
        .unwrap_err();

        match err {
            ApiError::ValidationError(details) => assert_eq!(details[0].field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = build_patch(from_json(serde_json::json!({ "status": "archived" }))).unwrap_err();

        match err {
            ApiError::ValidationError(details) => assert_eq!(details[0].field, "status"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_failures_reported_together() {
        let err = build_patch(from_json(serde_json::json!({
            "title": "",
            "status": "archived"
        })))
        .unwrap_err();

        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 2);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_fields_carry_into_patch() {
        let patch = build_patch(from_json(serde_json::json!({
            "title": "Fix mobile responsiveness",
            "status": "done"
        })))
        .unwrap();

        assert_eq!(patch.title, Some("Fix mobile responsiveness".to_string()));
        assert_eq!(patch.status, Some(TaskStatus::Done));
        assert!(patch.description.is_none());
        assert!(patch.user_id.is_none());
    }
}
