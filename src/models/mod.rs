use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Name of the sentinel priority that always exists and backs orphaned tasks.
pub const DEFAULT_PRIORITY: &str = "Default";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Category identity is its name, compared case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Priority {
    pub name: String,
}

impl Priority {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn is_default(&self) -> bool {
        self.matches(DEFAULT_PRIORITY)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    InProgress,
    Postponed,
    Completed,
    /// Derived by the overdue sweep; never set directly by a user action.
    Delayed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::InProgress => "IN_PROGRESS",
            Status::Postponed => "POSTPONED",
            Status::Completed => "COMPLETED",
            Status::Delayed => "DELAYED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    pub priority: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub status: Status,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            category: None,
            priority: DEFAULT_PRIORITY.to_string(),
            deadline: None,
            status: Status::Open,
        }
    }

    /// An empty priority name falls back to the Default sentinel.
    pub fn set_priority(&mut self, priority: &str) {
        if priority.trim().is_empty() {
            self.priority = DEFAULT_PRIORITY.to_string();
        } else {
            self.priority = priority.to_string();
        }
    }

    pub fn in_category(&self, name: &str) -> bool {
        self.category.as_ref().is_some_and(|c| c.matches(name))
    }

    pub fn has_priority(&self, name: &str) -> bool {
        self.priority.to_lowercase() == name.to_lowercase()
    }

    /// Allowed reminder range: one calendar month before the deadline up to
    /// the deadline itself, inclusive. Month subtraction clamps the day when
    /// the previous month is shorter. `None` when the task has no deadline.
    pub fn reminder_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let deadline = self.deadline?;
        let start = deadline.checked_sub_months(Months::new(1))?;
        Some((start, deadline))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub task_id: Uuid,
    pub reminder_date: NaiveDate,
    pub description: String,
}

impl Reminder {
    pub fn new(task_id: Uuid, reminder_date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            reminder_date,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Priority already exists: {0}")]
    DuplicatePriority(String),
    #[error("Priority not found: {0}")]
    PriorityNotFound(String),
    #[error("The Default priority cannot be renamed or deleted")]
    ProtectedPriority,
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),
    #[error("Reminder not found")]
    ReminderNotFound,
    #[error("Cannot set a reminder for a completed task")]
    CompletedTask,
    #[error("Task has no deadline to set a reminder against")]
    MissingDeadline,
    #[error("Reminder date {date} is outside the allowed range {start} to {end}")]
    OutsideWindow {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}
