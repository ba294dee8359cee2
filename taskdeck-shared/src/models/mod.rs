/// Database models for TaskDeck
///
/// This module contains the entity stores and their operations.
///
/// # Models
///
/// - `user`: User accounts with an employee/admin role flag
/// - `task`: Tasks with a status field and an optional owning user
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task, TaskStatus};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Review project requirements".to_string(),
///     description: None,
///     status: TaskStatus::Pending,
///     user_id: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
