use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{DomainError, Reminder};

/// Owns the reminder collection. Date validation against the task deadline
/// happens in the planner, which can see both stores.
#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self {
            reminders: Vec::new(),
        }
    }

    pub fn replace(&mut self, reminders: Vec<Reminder>) {
        self.reminders = reminders;
    }

    pub fn all(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn add(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    pub fn contains(&self, task_id: Uuid, date: NaiveDate) -> bool {
        self.reminders
            .iter()
            .any(|r| r.task_id == task_id && r.reminder_date == date)
    }

    /// First reminder matching `(task_id, date)`, the pair the UI edits by.
    pub fn find_mut(&mut self, task_id: Uuid, date: NaiveDate) -> Option<&mut Reminder> {
        self.reminders
            .iter_mut()
            .find(|r| r.task_id == task_id && r.reminder_date == date)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), DomainError> {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        if self.reminders.len() == before {
            return Err(DomainError::ReminderNotFound);
        }
        Ok(())
    }

    /// Bulk removal used by every cascade path (task delete, task
    /// completion, category delete). Returns how many were dropped.
    pub fn remove_for_task(&mut self, task_id: Uuid) -> usize {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.task_id != task_id);
        before - self.reminders.len()
    }

    /// Drops every reminder dated strictly before `today`.
    pub fn clean_expired_on(&mut self, today: NaiveDate) -> usize {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.reminder_date >= today);
        before - self.reminders.len()
    }

    pub fn for_task(&self, task_id: Uuid) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.task_id == task_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_remove_for_task_leaves_other_reminders() {
        let mut store = ReminderStore::new();
        let task_a = Uuid::new_v4();
        let task_b = Uuid::new_v4();
        store.add(Reminder::new(task_a, date(2025, 3, 1), "first"));
        store.add(Reminder::new(task_a, date(2025, 3, 5), "second"));
        store.add(Reminder::new(task_b, date(2025, 3, 5), "other"));

        assert_eq!(store.remove_for_task(task_a), 2);
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].task_id, task_b);
    }

    #[test]
    fn test_clean_expired_keeps_today() {
        let mut store = ReminderStore::new();
        let task = Uuid::new_v4();
        let today = date(2025, 3, 10);
        store.add(Reminder::new(task, date(2025, 3, 9), "stale"));
        store.add(Reminder::new(task, today, "due"));
        store.add(Reminder::new(task, date(2025, 3, 11), "ahead"));

        assert_eq!(store.clean_expired_on(today), 1);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn test_remove_unknown_reminder_fails() {
        let mut store = ReminderStore::new();
        assert_eq!(
            store.remove(Uuid::new_v4()),
            Err(DomainError::ReminderNotFound)
        );
    }

    #[test]
    fn test_for_task_filters_by_task_id() {
        let mut store = ReminderStore::new();
        let task_a = Uuid::new_v4();
        let task_b = Uuid::new_v4();
        store.add(Reminder::new(task_a, date(2025, 3, 1), "mine"));
        store.add(Reminder::new(task_b, date(2025, 3, 2), "not mine"));

        let mine = store.for_task(task_a);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].description, "mine");
    }
}
