//! # TaskDeck CLI
//!
//! Command-line client for a TaskDeck server. Lists, creates, edits,
//! deletes, and assigns tasks, and renders a board summary from the
//! local cache.
//!
//! ## Usage
//!
//! ```bash
//! taskdeck tasks
//! taskdeck create "Write API documentation" --status pending
//! taskdeck assign 42 7
//! taskdeck board
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use taskdeck_client::api::{ApiClient, NewTask, TaskChanges};
use taskdeck_client::cache::{StatusCounts, TaskCache};
use taskdeck_shared::models::task::{TaskStatus, TaskWithOwner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "TaskDeck command-line client")]
struct Cli {
    /// Base URL of the TaskDeck API server
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all tasks
    Tasks,

    /// List employees available for assignment
    Users,

    /// Create a new task
    Create {
        /// Task title
        title: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Initial status (pending, in_progress or done)
        #[arg(long, default_value = "pending")]
        status: String,

        /// Assign to this user on creation
        #[arg(long)]
        user: Option<i64>,
    },

    /// Update fields on a task
    Update {
        /// Task id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New status (pending, in_progress or done)
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },

    /// Assign a task to an employee
    Assign {
        /// Task id
        id: i64,

        /// Employee user id
        user: i64,
    },

    /// Show the board summary
    Board,
}

fn parse_status(s: &str) -> anyhow::Result<TaskStatus> {
    TaskStatus::parse(s)
        .with_context(|| format!("unknown status {:?}, expected pending, in_progress or done", s))
}

fn owner_label(task: &TaskWithOwner) -> String {
    match &task.user {
        Some(user) => format!("{} <{}>", user.name, user.email),
        None => "(unassigned)".to_string(),
    }
}

fn print_task(task: &TaskWithOwner) {
    println!(
        "{:>5}  {:<12} {:<40} {}",
        task.task.id,
        task.task.status.as_str(),
        task.task.title,
        owner_label(task)
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.server);

    match cli.command {
        Command::Tasks => {
            let tasks = client.list_tasks().await?;
            for task in &tasks {
                print_task(task);
            }
            println!("{} tasks", tasks.len());
        }

        Command::Users => {
            let users = client.list_employees().await?;
            for user in &users {
                println!("{:>5}  {:<25} {}", user.id, user.name, user.email);
            }
            println!("{} employees", users.len());
        }

        Command::Create {
            title,
            description,
            status,
            user,
        } => {
            let task = client
                .create_task(&NewTask {
                    title,
                    description,
                    status: parse_status(&status)?,
                    user_id: user,
                })
                .await?;

            println!("created task {}", task.task.id);
            print_task(&task);
        }

        Command::Update {
            id,
            title,
            description,
            status,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let task = client
                .update_task(
                    id,
                    &TaskChanges {
                        title,
                        description,
                        status,
                    },
                )
                .await?;

            println!("updated task {}", task.task.id);
            print_task(&task);
        }

        Command::Delete { id } => {
            client.delete_task(id).await?;
            println!("deleted task {}", id);
        }

        Command::Assign { id, user } => {
            let outcome = client.assign_task(id, user).await?;
            println!("{}", outcome.message);
            print_task(&outcome.task);
        }

        Command::Board => {
            let mut cache = TaskCache::new();
            cache.load(&client).await?;
            let viewer = client.current_user().await?;

            let all = cache.status_counts();
            println!(
                "All tasks: {} ({} pending, {} in progress, {} done)",
                all.total, all.pending, all.in_progress, all.done
            );

            if let Some(viewer) = &viewer {
                let mine = StatusCounts::of(cache.my_tasks(viewer.id).into_iter());
                println!(
                    "My tasks ({}): {} ({} pending, {} in progress, {} done)",
                    viewer.name, mine.total, mine.pending, mine.in_progress, mine.done
                );
            }

            let unassigned = cache.unassigned();
            println!("\nUnassigned ({}):", unassigned.len());
            for task in unassigned {
                print_task(task);
            }

            println!("\nPer employee:");
            for user in cache.users() {
                let tasks = cache.tasks_for(user.id);
                let counts = StatusCounts::of(tasks.iter().copied());
                println!(
                    "  {} <{}>: {} ({} pending, {} in progress, {} done)",
                    user.name, user.email, counts.total, counts.pending, counts.in_progress, counts.done
                );
                for task in tasks {
                    println!("    [{}] {} ({})", task.task.id, task.task.title, task.task.status.as_str());
                }
            }
        }
    }

    Ok(())
}
