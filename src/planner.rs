use chrono::{Local, NaiveDate};
use log::{info, warn};
use uuid::Uuid;

use crate::category_store::CategoryStore;
use crate::models::{Category, DomainError, Priority, Reminder, Status, Task, DEFAULT_PRIORITY};
use crate::priority_store::PriorityStore;
use crate::reminder_store::ReminderStore;
use crate::storage::{JsonStorage, StorageError};
use crate::task_store::TaskStore;

/// Input for creating or editing a task. Category and priority are given by
/// name and resolved against the stores; an absent priority means the
/// Default sentinel.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub delayed: usize,
    pub upcoming: usize,
}

/// Coordinates the four stores. Every cross-store consistency rule lives
/// here as an explicit method: category/priority renames and deletes fan out
/// into tasks, task deletions and completions fan out into reminders, and
/// reminder dates are validated against the owning task's deadline.
#[derive(Debug, Default)]
pub struct Planner {
    categories: CategoryStore,
    priorities: PriorityStore,
    tasks: TaskStore,
    reminders: ReminderStore,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Planner {
    pub fn new() -> Self {
        Self {
            categories: CategoryStore::new(),
            priorities: PriorityStore::new(),
            tasks: TaskStore::new(),
            reminders: ReminderStore::new(),
        }
    }

    /// Startup hook: load all four collections, then run the overdue sweep
    /// before anything else can observe the tasks.
    pub fn load(storage: &JsonStorage) -> Self {
        let mut planner = Self::new();
        planner.categories.replace(storage.load_categories());
        planner.priorities.replace(storage.load_priorities());
        planner.tasks.replace(storage.load_tasks());
        planner.reminders.replace(storage.load_reminders());

        let swept = planner.tasks.update_overdue_on(today());
        if swept > 0 {
            info!("marked {swept} overdue task(s) as delayed");
        }
        planner
    }

    /// Shutdown hook: write all four collections back. Each file is
    /// attempted even if an earlier one fails; the first error is returned
    /// after the rest have been tried.
    pub fn save(&self, storage: &JsonStorage) -> Result<(), StorageError> {
        let results = [
            ("categories", storage.save_categories(self.categories.all())),
            ("priorities", storage.save_priorities(self.priorities.all())),
            ("tasks", storage.save_tasks(self.tasks.all())),
            ("reminders", storage.save_reminders(self.reminders.all())),
        ];
        let mut first_err = None;
        for (name, result) in results {
            if let Err(err) = result {
                warn!("failed to save {name}: {err}");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // Categories

    pub fn categories(&self) -> &[Category] {
        self.categories.all()
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), DomainError> {
        self.categories.add(name)?;
        info!("added category {name}");
        Ok(())
    }

    /// Renames the category and rewrites the name on every task in it.
    /// Returns how many tasks were touched.
    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> Result<usize, DomainError> {
        self.categories.rename(old_name, new_name)?;
        let touched = self.tasks.rename_category(old_name, new_name);
        info!("renamed category {old_name} to {new_name}, updated {touched} task(s)");
        Ok(touched)
    }

    /// Deletes the category, every task in it, and every reminder of those
    /// tasks. Returns the ids of the deleted tasks so the caller can refresh
    /// dependent views.
    pub fn delete_category(&mut self, name: &str) -> Result<Vec<Uuid>, DomainError> {
        self.categories.remove(name)?;
        let deleted = self.tasks.remove_by_category(name);
        for id in &deleted {
            self.reminders.remove_for_task(*id);
        }
        info!(
            "deleted category {name} along with {} task(s) and their reminders",
            deleted.len()
        );
        Ok(deleted)
    }

    // Priorities

    pub fn priorities(&self) -> &[Priority] {
        self.priorities.all()
    }

    pub fn add_priority(&mut self, name: &str) -> Result<(), DomainError> {
        self.priorities.add(name)?;
        info!("added priority {name}");
        Ok(())
    }

    /// Renames the priority and rewrites it on every task holding it.
    /// Returns how many tasks were touched.
    pub fn rename_priority(&mut self, old_name: &str, new_name: &str) -> Result<usize, DomainError> {
        self.priorities.rename(old_name, new_name)?;
        let touched = self.tasks.rename_priority(old_name, new_name);
        info!("renamed priority {old_name} to {new_name}, updated {touched} task(s)");
        Ok(touched)
    }

    /// Deletes the priority; tasks that held it fall back to Default (they
    /// are never deleted). Returns how many tasks were reassigned.
    pub fn delete_priority(&mut self, name: &str) -> Result<usize, DomainError> {
        self.priorities.remove(name)?;
        let reassigned = self.tasks.reassign_priority(name);
        info!("deleted priority {name}, reassigned {reassigned} task(s) to Default");
        Ok(reassigned)
    }

    // Tasks

    pub fn tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Uuid, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        let mut task = Task::new(draft.title.clone());
        task.description = draft.description;
        task.category = self.resolve_category(draft.category.as_deref())?;
        task.priority = self.resolve_priority(draft.priority.as_deref())?;
        task.deadline = draft.deadline;
        let id = task.id;
        self.tasks.add(task);
        info!("added task {id} ({})", draft.title);
        Ok(id)
    }

    /// Replaces the task's editable fields. Changing the deadline does not
    /// re-validate reminders that already exist; only future reminder
    /// operations see the new window.
    pub fn edit_task(&mut self, id: Uuid, draft: TaskDraft) -> Result<(), DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if self.tasks.get(id).is_none() {
            return Err(DomainError::TaskNotFound(id));
        }
        let category = self.resolve_category(draft.category.as_deref())?;
        let priority = self.resolve_priority(draft.priority.as_deref())?;
        if let Some(task) = self.tasks.get_mut(id) {
            task.title = draft.title;
            task.description = draft.description;
            task.category = category;
            task.priority = priority;
            task.deadline = draft.deadline;
        }
        info!("edited task {id}");
        Ok(())
    }

    /// Deletes the task and every reminder referencing it. Returns how many
    /// reminders went with it.
    pub fn delete_task(&mut self, id: Uuid) -> Result<usize, DomainError> {
        self.tasks.remove(id)?;
        let dropped = self.reminders.remove_for_task(id);
        info!("deleted task {id} and {dropped} reminder(s)");
        Ok(dropped)
    }

    /// Sets the task status. Completing a task drops all of its reminders;
    /// the count of dropped reminders is returned.
    pub fn set_task_status(&mut self, id: Uuid, status: Status) -> Result<usize, DomainError> {
        self.tasks.set_status(id, status)?;
        let dropped = if status == Status::Completed {
            self.reminders.remove_for_task(id)
        } else {
            0
        };
        info!("task {id} is now {status}");
        Ok(dropped)
    }

    /// Overdue sweep against the real clock; normally run once per session
    /// by `load`.
    pub fn update_overdue(&mut self) -> usize {
        self.tasks.update_overdue_on(today())
    }

    pub fn update_overdue_on(&mut self, today: NaiveDate) -> usize {
        self.tasks.update_overdue_on(today)
    }

    pub fn summary(&self) -> Summary {
        self.summary_on(today())
    }

    pub fn summary_on(&self, today: NaiveDate) -> Summary {
        Summary {
            total: self.tasks.total(),
            completed: self.tasks.completed(),
            delayed: self.tasks.delayed(),
            upcoming: self.tasks.upcoming_on(today),
        }
    }

    // Reminders

    pub fn reminders(&self) -> &[Reminder] {
        self.reminders.all()
    }

    pub fn reminders_for_task(&self, task_id: Uuid) -> Vec<&Reminder> {
        self.reminders.for_task(task_id)
    }

    /// Creates a reminder after checking the task exists, is not completed,
    /// and that the date falls inside the task's validity window.
    pub fn add_reminder(
        &mut self,
        task_id: Uuid,
        date: NaiveDate,
        description: &str,
    ) -> Result<Uuid, DomainError> {
        let task = self
            .tasks
            .get(task_id)
            .ok_or(DomainError::TaskNotFound(task_id))?;
        if task.status == Status::Completed {
            return Err(DomainError::CompletedTask);
        }
        check_window(task, date)?;
        let reminder = Reminder::new(task_id, date, description);
        let id = reminder.id;
        self.reminders.add(reminder);
        info!("added reminder {id} for task {task_id} on {date}");
        Ok(id)
    }

    /// Locates the reminder by `(task_id, old_date)` and moves it to
    /// `new_date`, re-validating against the task's current deadline.
    pub fn modify_reminder(
        &mut self,
        task_id: Uuid,
        old_date: NaiveDate,
        new_date: NaiveDate,
        new_description: &str,
    ) -> Result<(), DomainError> {
        if !self.reminders.contains(task_id, old_date) {
            return Err(DomainError::ReminderNotFound);
        }
        let task = self
            .tasks
            .get(task_id)
            .ok_or(DomainError::TaskNotFound(task_id))?;
        check_window(task, new_date)?;
        if let Some(reminder) = self.reminders.find_mut(task_id, old_date) {
            reminder.reminder_date = new_date;
            reminder.description = new_description.to_string();
        }
        info!("moved reminder for task {task_id} from {old_date} to {new_date}");
        Ok(())
    }

    pub fn delete_reminder(&mut self, id: Uuid) -> Result<(), DomainError> {
        self.reminders.remove(id)?;
        info!("deleted reminder {id}");
        Ok(())
    }

    pub fn delete_reminders_for_task(&mut self, task_id: Uuid) -> usize {
        self.reminders.remove_for_task(task_id)
    }

    /// Maintenance sweep: drops reminders dated before today. Callers decide
    /// when to run it.
    pub fn clean_expired_reminders(&mut self) -> usize {
        self.clean_expired_reminders_on(today())
    }

    pub fn clean_expired_reminders_on(&mut self, today: NaiveDate) -> usize {
        let dropped = self.reminders.clean_expired_on(today);
        if dropped > 0 {
            info!("cleaned {dropped} expired reminder(s)");
        }
        dropped
    }

    fn resolve_category(&self, name: Option<&str>) -> Result<Option<Category>, DomainError> {
        match name {
            // Stored with the canonical casing of the category collection.
            Some(name) => match self.categories.get(name) {
                Some(category) => Ok(Some(category.clone())),
                None => Err(DomainError::CategoryNotFound(name.to_string())),
            },
            None => Ok(None),
        }
    }

    fn resolve_priority(&self, name: Option<&str>) -> Result<String, DomainError> {
        match name {
            Some(name) if !name.trim().is_empty() => match self.priorities.get(name) {
                Some(priority) => Ok(priority.name.clone()),
                None => Err(DomainError::PriorityNotFound(name.to_string())),
            },
            _ => Ok(DEFAULT_PRIORITY.to_string()),
        }
    }
}

fn check_window(task: &Task, date: NaiveDate) -> Result<(), DomainError> {
    let (start, end) = task.reminder_window().ok_or(DomainError::MissingDeadline)?;
    if date < start || date > end {
        return Err(DomainError::OutsideWindow { date, start, end });
    }
    Ok(())
}
