use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::models::{DomainError, Status, Task, DEFAULT_PRIORITY};

/// Owns the task collection. The rename/reassign/delete sweeps below are the
/// receiving half of category and priority cascades; the planner decides when
/// to run them.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), DomainError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(DomainError::TaskNotFound(id));
        }
        Ok(())
    }

    pub fn set_status(&mut self, id: Uuid, status: Status) -> Result<(), DomainError> {
        let task = self.get_mut(id).ok_or(DomainError::TaskNotFound(id))?;
        task.status = status;
        Ok(())
    }

    /// Rewrites the category name on every task in `old_name`. Returns how
    /// many tasks were touched.
    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut touched = 0;
        for task in self.tasks.iter_mut() {
            if task.in_category(old_name) {
                task.category = Some(crate::models::Category::new(new_name));
                touched += 1;
            }
        }
        touched
    }

    /// Removes every task in the category and returns their ids so the
    /// caller can cascade to reminders.
    pub fn remove_by_category(&mut self, name: &str) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self
            .tasks
            .iter()
            .filter(|t| t.in_category(name))
            .map(|t| t.id)
            .collect();
        self.tasks.retain(|t| !t.in_category(name));
        ids
    }

    pub fn rename_priority(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut touched = 0;
        for task in self.tasks.iter_mut() {
            if task.has_priority(old_name) {
                task.priority = new_name.to_string();
                touched += 1;
            }
        }
        touched
    }

    /// Points every task holding `name` back at the Default sentinel.
    /// Returns how many tasks were reassigned.
    pub fn reassign_priority(&mut self, name: &str) -> usize {
        let mut touched = 0;
        for task in self.tasks.iter_mut() {
            if task.has_priority(name) {
                task.priority = DEFAULT_PRIORITY.to_string();
                touched += 1;
            }
        }
        touched
    }

    /// Marks every task with a deadline strictly before `today` (and not
    /// completed) as delayed. Returns how many tasks flipped.
    pub fn update_overdue_on(&mut self, today: NaiveDate) -> usize {
        let mut swept = 0;
        for task in self.tasks.iter_mut() {
            if let Some(deadline) = task.deadline {
                if deadline < today && task.status != Status::Completed {
                    task.status = Status::Delayed;
                    swept += 1;
                }
            }
        }
        swept
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == Status::Completed)
            .count()
    }

    pub fn delayed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == Status::Delayed)
            .count()
    }

    /// Tasks whose deadline falls within the next week, today and the
    /// seventh day included.
    pub fn upcoming_on(&self, today: NaiveDate) -> usize {
        let horizon = today + Days::new(7);
        self.tasks
            .iter()
            .filter(|t| {
                t.deadline
                    .is_some_and(|deadline| deadline >= today && deadline <= horizon)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_with_deadline(title: &str, deadline: Option<NaiveDate>) -> Task {
        let mut task = Task::new(title);
        task.deadline = deadline;
        task
    }

    #[test]
    fn test_overdue_sweep_flips_open_tasks_only() {
        let mut store = TaskStore::new();
        let today = date(2025, 3, 10);

        store.add(task_with_deadline("late", Some(date(2025, 3, 1))));
        store.add(task_with_deadline("due today", Some(date(2025, 3, 10))));
        store.add(task_with_deadline("no deadline", None));
        let mut done = task_with_deadline("late but done", Some(date(2025, 2, 1)));
        done.status = Status::Completed;
        store.add(done);

        assert_eq!(store.update_overdue_on(today), 1);
        assert_eq!(store.all()[0].status, Status::Delayed);
        assert_eq!(store.all()[1].status, Status::Open);
        assert_eq!(store.all()[2].status, Status::Open);
        assert_eq!(store.all()[3].status, Status::Completed);
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        let mut store = TaskStore::new();
        let today = date(2025, 3, 10);

        store.add(task_with_deadline("today", Some(today)));
        store.add(task_with_deadline("seventh day", Some(date(2025, 3, 17))));
        store.add(task_with_deadline("eighth day", Some(date(2025, 3, 18))));
        store.add(task_with_deadline("yesterday", Some(date(2025, 3, 9))));

        assert_eq!(store.upcoming_on(today), 2);
    }

    #[test]
    fn test_remove_by_category_returns_removed_ids() {
        let mut store = TaskStore::new();
        let mut in_work = Task::new("report");
        in_work.category = Some(Category::new("Work"));
        let work_id = in_work.id;
        let mut in_home = Task::new("laundry");
        in_home.category = Some(Category::new("Home"));
        store.add(in_work);
        store.add(in_home);

        let removed = store.remove_by_category("work");
        assert_eq!(removed, vec![work_id]);
        assert_eq!(store.total(), 1);
        assert_eq!(store.all()[0].title, "laundry");
    }

    #[test]
    fn test_reassign_priority_targets_default() {
        let mut store = TaskStore::new();
        let mut urgent = Task::new("a");
        urgent.set_priority("Urgent");
        let mut other = Task::new("b");
        other.set_priority("Low");
        store.add(urgent);
        store.add(other);

        assert_eq!(store.reassign_priority("urgent"), 1);
        assert_eq!(store.all()[0].priority, DEFAULT_PRIORITY);
        assert_eq!(store.all()[1].priority, "Low");
    }

    #[test]
    fn test_rename_category_rewrites_matching_tasks() {
        let mut store = TaskStore::new();
        let mut task = Task::new("report");
        task.category = Some(Category::new("Work"));
        store.add(task);
        store.add(Task::new("uncategorized"));

        assert_eq!(store.rename_category("WORK", "Office"), 1);
        assert_eq!(
            store.all()[0].category.as_ref().unwrap().name,
            "Office"
        );
        assert!(store.all()[1].category.is_none());
    }
}
