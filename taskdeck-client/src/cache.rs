/// Client-side task and user cache
///
/// Holds the fetched task and user lists and keeps them consistent with
/// the backend after each mutation. The reconciliation rules are fixed:
///
/// - create: prepend the returned task
/// - update / assign: replace the cached task with the same id
/// - delete: remove the cached task with that id
/// - or re-fetch the full list when in doubt
///
/// Derived views (my tasks, unassigned tasks, per-employee groupings,
/// status counts) are computed from the cached list on demand, never
/// stored.
///
/// Concurrent mutations from elsewhere are not detected here; the cache
/// reflects this client's view and the next refresh wins.

use crate::api::{ApiClient, ClientResult};
use taskdeck_shared::models::task::{TaskStatus, TaskWithOwner};
use taskdeck_shared::models::user::User;

/// Aggregate task counts by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    /// Computes counts over any set of tasks
    pub fn of<'a>(tasks: impl IntoIterator<Item = &'a TaskWithOwner>) -> Self {
        let mut counts = StatusCounts::default();

        for task in tasks {
            counts.total += 1;
            match task.task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }

        counts
    }
}

/// Local cache of the task and user lists
#[derive(Debug, Clone, Default)]
pub struct TaskCache {
    tasks: Vec<TaskWithOwner>,
    users: Vec<User>,
}

impl TaskCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches both lists from the server (mount behavior)
    pub async fn load(&mut self, client: &ApiClient) -> ClientResult<()> {
        self.tasks = client.list_tasks().await?;
        self.users = client.list_employees().await?;

        tracing::debug!(
            tasks = self.tasks.len(),
            users = self.users.len(),
            "Cache loaded"
        );

        Ok(())
    }

    /// Re-fetches the task list, discarding local reconciliation state
    pub async fn refresh_tasks(&mut self, client: &ApiClient) -> ClientResult<()> {
        self.tasks = client.list_tasks().await?;
        Ok(())
    }

    /// All cached tasks, in cache order
    pub fn tasks(&self) -> &[TaskWithOwner] {
        &self.tasks
    }

    /// All cached employees
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Reconciles a freshly created task: prepend
    pub fn insert_created(&mut self, task: TaskWithOwner) {
        self.tasks.insert(0, task);
    }

    /// Reconciles an updated or reassigned task: replace-by-id
    ///
    /// A task that is not cached is left alone; the next refresh picks
    /// it up.
    pub fn apply_updated(&mut self, task: TaskWithOwner) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.task.id == task.task.id) {
            *slot = task;
        }
    }

    /// Reconciles a deletion: remove-by-id
    pub fn remove(&mut self, id: i64) {
        self.tasks.retain(|t| t.task.id != id);
    }

    /// Tasks owned by the given viewer
    pub fn my_tasks(&self, viewer_id: i64) -> Vec<&TaskWithOwner> {
        self.tasks
            .iter()
            .filter(|t| t.task.user_id == Some(viewer_id))
            .collect()
    }

    /// Tasks with no owner
    pub fn unassigned(&self) -> Vec<&TaskWithOwner> {
        self.tasks
            .iter()
            .filter(|t| t.task.user_id.is_none())
            .collect()
    }

    /// Tasks owned by a specific employee (per-employee grouping)
    pub fn tasks_for(&self, user_id: i64) -> Vec<&TaskWithOwner> {
        self.tasks
            .iter()
            .filter(|t| t.task.user_id == Some(user_id))
            .collect()
    }

    /// Status counts over the whole cached list
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::of(&self.tasks)
    }
}
