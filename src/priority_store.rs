use crate::models::{DomainError, Priority, DEFAULT_PRIORITY};

/// Owns the priority collection and the Default-sentinel invariant: exactly
/// one priority named "Default" exists at all times and never goes away.
#[derive(Debug)]
pub struct PriorityStore {
    priorities: Vec<Priority>,
}

impl Default for PriorityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityStore {
    pub fn new() -> Self {
        let mut store = Self {
            priorities: Vec::new(),
        };
        store.ensure_default();
        store
    }

    /// Swaps in a freshly loaded collection, re-seeding the sentinel if the
    /// file on disk lacked it.
    pub fn replace(&mut self, priorities: Vec<Priority>) {
        self.priorities = priorities;
        self.ensure_default();
    }

    pub fn all(&self) -> &[Priority] {
        &self.priorities
    }

    pub fn contains(&self, name: &str) -> bool {
        self.priorities.iter().any(|p| p.matches(name))
    }

    pub fn get(&self, name: &str) -> Option<&Priority> {
        self.priorities.iter().find(|p| p.matches(name))
    }

    pub fn add(&mut self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        // Also covers attempts to add a second "Default".
        if self.contains(name) {
            return Err(DomainError::DuplicatePriority(name.to_string()));
        }
        self.priorities.push(Priority::new(name));
        Ok(())
    }

    /// Renames in place; the first case-insensitive match wins. The sentinel
    /// itself cannot be renamed.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), DomainError> {
        if old_name.eq_ignore_ascii_case(DEFAULT_PRIORITY) {
            return Err(DomainError::ProtectedPriority);
        }
        if new_name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        let priority = self
            .priorities
            .iter_mut()
            .find(|p| p.matches(old_name))
            .ok_or_else(|| DomainError::PriorityNotFound(old_name.to_string()))?;
        priority.name = new_name.to_string();
        self.ensure_default();
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), DomainError> {
        if name.eq_ignore_ascii_case(DEFAULT_PRIORITY) {
            return Err(DomainError::ProtectedPriority);
        }
        let before = self.priorities.len();
        self.priorities.retain(|p| !p.matches(name));
        if self.priorities.len() == before {
            return Err(DomainError::PriorityNotFound(name.to_string()));
        }
        self.ensure_default();
        Ok(())
    }

    /// Single enforcement point for the sentinel invariant; every path that
    /// can change the collection ends here.
    fn ensure_default(&mut self) {
        if !self.contains(DEFAULT_PRIORITY) {
            self.priorities.push(Priority::new(DEFAULT_PRIORITY));
        }
    }
}
