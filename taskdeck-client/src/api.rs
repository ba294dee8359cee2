/// HTTP client for the TaskDeck API
///
/// Thin wrapper around reqwest covering the task and user endpoints.
/// Non-success responses are parsed into `ClientError::Api` with the
/// server's message; no retries are attempted.
///
/// # Example
///
/// ```no_run
/// use taskdeck_client::api::{ApiClient, NewTask};
/// use taskdeck_shared::models::task::TaskStatus;
///
/// # async fn example() -> Result<(), taskdeck_client::api::ClientError> {
/// let client = ApiClient::new("http://localhost:8080");
///
/// let task = client.create_task(&NewTask {
///     title: "Review project requirements".to_string(),
///     description: None,
///     status: TaskStatus::Pending,
///     user_id: None,
/// }).await?;
///
/// client.assign_task(task.task.id, 7).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use taskdeck_shared::models::task::{TaskStatus, TaskWithOwner};
use taskdeck_shared::models::user::User;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the API client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad JSON)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Payload for creating a task
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: TaskStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Payload for a partial task update
///
/// Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Assignment response: confirmation message plus the updated task
#[derive(Debug, Deserialize)]
pub struct AssignOutcome {
    pub message: String,
    pub task: TaskWithOwner,
}

#[derive(Deserialize)]
struct TasksEnvelope {
    tasks: Vec<TaskWithOwner>,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: TaskWithOwner,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client bound to one TaskDeck server
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps non-success responses into `ClientError::Api`
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetches all tasks with their owner projections
    pub async fn list_tasks(&self) -> ClientResult<Vec<TaskWithOwner>> {
        let response = self.http.get(self.url("/tasks")).send().await?;
        let envelope: TasksEnvelope = Self::check(response).await?.json().await?;

        Ok(envelope.tasks)
    }

    /// Creates a task and returns the persisted record
    pub async fn create_task(&self, task: &NewTask) -> ClientResult<TaskWithOwner> {
        let response = self.http.post(self.url("/tasks")).json(task).send().await?;
        let envelope: TaskEnvelope = Self::check(response).await?.json().await?;

        Ok(envelope.task)
    }

    /// Applies a partial update to a task
    pub async fn update_task(&self, id: i64, changes: &TaskChanges) -> ClientResult<TaskWithOwner> {
        let response = self
            .http
            .patch(self.url(&format!("/tasks/{}", id)))
            .json(changes)
            .send()
            .await?;
        let envelope: TaskEnvelope = Self::check(response).await?.json().await?;

        Ok(envelope.task)
    }

    /// Deletes a task
    pub async fn delete_task(&self, id: i64) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    /// Assigns a task to a user
    pub async fn assign_task(&self, id: i64, user_id: i64) -> ClientResult<AssignOutcome> {
        let response = self
            .http
            .post(self.url(&format!("/tasks/{}/assign", id)))
            .json(&serde_json::json!({ "user_id": user_id }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetches all employee-role users
    pub async fn list_employees(&self) -> ClientResult<Vec<User>> {
        let response = self.http.get(self.url("/users")).send().await?;
        let envelope: UsersEnvelope = Self::check(response).await?.json().await?;

        Ok(envelope.users)
    }

    /// Fetches the current viewer (None when the server has no users)
    pub async fn current_user(&self) -> ClientResult<Option<User>> {
        let response = self.http.get(self.url("/user")).send().await?;

        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/tasks"), "http://localhost:8080/tasks");

        let client = ApiClient::new("http://localhost:8080");
        assert_eq!(client.url("/tasks/3/assign"), "http://localhost:8080/tasks/3/assign");
    }

    #[test]
    fn test_new_task_serializes_wire_status() {
        let task = NewTask {
            title: "Design landing page".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            user_id: None,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in_progress");
        // Absent optionals stay off the wire
        assert!(json.get("description").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_task_changes_serializes_only_present_fields() {
        let changes = TaskChanges {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };

        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["status"], "done");
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ApiErrorBody = serde_json::from_value(serde_json::json!({
            "error": "validation_error",
            "message": "Request validation failed"
        }))
        .unwrap();

        assert_eq!(
            body.message.or(body.error).unwrap(),
            "Request validation failed"
        );
    }
}
