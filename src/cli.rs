use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

use crate::models::Status;

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Personal task, category, priority and reminder tracker")]
pub struct Cli {
    /// Path to an alternate config file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage tasks.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage priorities.
    #[command(subcommand)]
    Priority(PriorityCommand),
    /// Manage deadline reminders.
    #[command(subcommand)]
    Reminder(ReminderCommand),
    /// Show task counts: total, completed, delayed, due this week.
    Summary,
    /// Inspect or change configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Add a new task.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Deadline as YYYY-MM-DD.
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// List all tasks.
    List,
    /// Edit a task's fields; omitted flags keep the current value.
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_deadline")]
        deadline: Option<NaiveDate>,
        #[arg(long)]
        clear_deadline: bool,
    },
    /// Change a task's status.
    Status { id: Uuid, status: StatusArg },
    /// Delete a task and its reminders.
    Delete { id: Uuid },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    Add { name: String },
    /// Rename a category; tasks in it follow along.
    Rename { old_name: String, new_name: String },
    /// Delete a category along with its tasks and their reminders.
    Delete { name: String },
    List,
}

#[derive(Subcommand)]
pub enum PriorityCommand {
    Add { name: String },
    /// Rename a priority; tasks holding it follow along.
    Rename { old_name: String, new_name: String },
    /// Delete a priority; its tasks fall back to Default.
    Delete { name: String },
    List,
}

#[derive(Subcommand)]
pub enum ReminderCommand {
    /// Add a reminder for a task. The date must fall between one month
    /// before the task's deadline and the deadline itself.
    Add {
        task_id: Uuid,
        date: NaiveDate,
        description: String,
    },
    /// Move a reminder identified by its task and current date.
    Modify {
        task_id: Uuid,
        old_date: NaiveDate,
        new_date: NaiveDate,
        description: String,
    },
    /// Delete a single reminder by id.
    Delete { id: Uuid },
    /// List reminders, optionally for one task.
    List {
        #[arg(long)]
        task_id: Option<Uuid>,
    },
    /// Remove reminders dated before today.
    Clean,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Get { key: String },
    Set { key: String, value: String },
    Unset { key: String },
    List,
}

/// Statuses a user may set directly. Delayed is derived by the overdue
/// sweep and is deliberately absent.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Open,
    InProgress,
    Postponed,
    Completed,
}

impl From<StatusArg> for Status {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Open => Status::Open,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Postponed => Status::Postponed,
            StatusArg::Completed => Status::Completed,
        }
    }
}
