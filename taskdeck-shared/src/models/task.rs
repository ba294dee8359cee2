/// Task model and database operations
///
/// This module provides the Task model, the core entity of TaskDeck.
/// A task optionally belongs to one user (its owner); the store only
/// holds the reference and the API layer joins and projects the owner.
///
/// Status is a plain field, not a state machine: any value may replace
/// any other at any time.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'done');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `user_id` has no foreign-key constraint. Owner existence is validated
/// at write time by the API layer; a user removed out-of-band leaves a
/// dangling reference that the list projection resolves to no owner.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task, TaskPatch, TaskStatus};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Write API documentation".to_string(),
///     description: Some("Document all endpoints with examples".to_string()),
///     status: TaskStatus::Pending,
///     user_id: None,
/// }).await?;
///
/// // Move it along
/// Task::update(&pool, task.id, TaskPatch {
///     status: Some(TaskStatus::InProgress),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::user::{UserRole, UserSummary};

/// Task status
///
/// Exactly three values; required on creation with no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet
    Pending,

    /// Someone is working on it
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parses a wire string into a status
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task model representing a tracked work item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned on creation
    pub id: i64,

    /// Owning user (None means unassigned)
    pub user_id: Option<i64>,

    /// Short title, at most 255 characters
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// A task with its owner projection attached
///
/// The `user` key is omitted from JSON when the task is unassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithOwner {
    #[serde(flatten)]
    pub task: Task,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (required, non-empty)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (required, no default)
    pub status: TaskStatus,

    /// Optional owner
    pub user_id: Option<i64>,
}

/// Partial update for an existing task
///
/// Outer `None` means "leave the field unchanged". For the nullable
/// fields, inner `None` writes NULL: `description: Some(None)` clears
/// the description and `user_id: Some(None)` unassigns the task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,

    /// New description (Some(None) to clear)
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New owner (Some(None) to unassign)
    pub user_id: Option<Option<i64>>,
}

impl TaskPatch {
    /// True when no field is present
    ///
    /// Applying an empty patch leaves every stored value unchanged apart
    /// from `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.user_id.is_none()
    }
}

/// Flat row shape for the task/owner LEFT JOIN
#[derive(sqlx::FromRow)]
struct TaskOwnerRow {
    id: i64,
    user_id: Option<i64>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_id: Option<i64>,
    owner_name: Option<String>,
    owner_email: Option<String>,
    owner_role: Option<UserRole>,
}

impl From<TaskOwnerRow> for TaskWithOwner {
    fn from(row: TaskOwnerRow) -> Self {
        let user = match (row.owner_id, row.owner_name, row.owner_email, row.owner_role) {
            (Some(id), Some(name), Some(email), Some(role)) => Some(UserSummary {
                id,
                name,
                email,
                role,
            }),
            _ => None,
        };

        TaskWithOwner {
            task: Task {
                id: row.id,
                user_id: row.user_id,
                title: row.title,
                description: row.description,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            user,
        }
    }
}

impl Task {
    /// Pairs this task with an already-fetched owner projection
    pub fn with_owner(self, user: Option<UserSummary>) -> TaskWithOwner {
        TaskWithOwner { task: self, user }
    }

    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails. Input validation
    /// (title length, owner existence) happens in the API layer before
    /// this is called.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks in insertion order, each with its owner projection
    ///
    /// Unassigned tasks and tasks whose owner no longer exists come back
    /// with no embedded owner.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TaskOwnerRow>(
            r#"
            SELECT t.id, t.user_id, t.title, t.description, t.status,
                   t.created_at, t.updated_at,
                   u.id AS owner_id, u.name AS owner_name,
                   u.email AS owner_email, u.role AS owner_role
            FROM tasks t
            LEFT JOIN users u ON u.id = t.user_id
            ORDER BY t.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithOwner::from).collect())
    }

    /// Applies a partial update to a task
    ///
    /// Only fields present in the patch are written; everything else
    /// retains its prior value. `updated_at` is always refreshed.
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task with that ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: TaskPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update statement from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if patch.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if patch.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if patch.user_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", user_id = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, user_id, title, description, status, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = patch.title {
            q = q.bind(title);
        }
        if let Some(description) = patch.description {
            q = q.bind(description);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }
        if let Some(user_id) = patch.user_id {
            q = q.bind(user_id);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Sets the owner of a task, overwriting any prior owner
    ///
    /// Reassignment is always permitted; assigning the same owner twice
    /// is a no-op apart from `updated_at`.
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task with that ID exists.
    pub async fn assign(pool: &PgPool, id: i64, user_id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET user_id = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task unconditionally
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false if no task with that ID exists.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 1,
            user_id: None,
            title: "Write unit tests".to_string(),
            description: None,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::parse("pending"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("running"), None);
        assert_eq!(TaskStatus::parse("In_Progress"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn test_status_serde_wire_format() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let status: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(status, TaskStatus::Done);

        assert!(serde_json::from_str::<TaskStatus>("\"cancelled\"").is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        // Present-null still counts as present
        let patch = TaskPatch {
            user_id: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_task_with_owner_omits_user_when_unassigned() {
        let json = serde_json::to_value(sample_task().with_owner(None)).unwrap();

        assert_eq!(json["title"], "Write unit tests");
        assert_eq!(json["user_id"], serde_json::Value::Null);
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_task_with_owner_flattens_task_fields() {
        let mut task = sample_task();
        task.user_id = Some(7);

        let owner = UserSummary {
            id: 7,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: UserRole::Employee,
        };

        let json = serde_json::to_value(task.with_owner(Some(owner))).unwrap();

        // Task fields sit at the top level next to the embedded owner
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["user"]["id"], 7);
        assert_eq!(json["user"]["role"], "employee");
        assert!(json["user"].get("password_hash").is_none());
    }
}
