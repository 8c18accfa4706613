use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::StorageError;
use crate::models::{Category, Priority, Reminder, Task};

pub const TASKS_FILE: &str = "tasks.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRIORITIES_FILE: &str = "priorities.json";
pub const REMINDERS_FILE: &str = "reminders.json";

/// Persists each collection as one JSON array file in the data directory.
/// Loads are tolerant: a missing, unreadable, or corrupt file yields an
/// empty collection so the application can keep running.
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        self.read_array(TASKS_FILE)
    }

    pub fn load_categories(&self) -> Vec<Category> {
        self.read_array(CATEGORIES_FILE)
    }

    pub fn load_priorities(&self) -> Vec<Priority> {
        self.read_array(PRIORITIES_FILE)
    }

    pub fn load_reminders(&self) -> Vec<Reminder> {
        self.read_array(REMINDERS_FILE)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.write_array(TASKS_FILE, tasks)
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<(), StorageError> {
        self.write_array(CATEGORIES_FILE, categories)
    }

    pub fn save_priorities(&self, priorities: &[Priority]) -> Result<(), StorageError> {
        self.write_array(PRIORITIES_FILE, priorities)
    }

    pub fn save_reminders(&self, reminders: &[Reminder]) -> Result<(), StorageError> {
        self.write_array(REMINDERS_FILE, reminders)
    }

    fn read_array<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            return Vec::new();
        }
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return Vec::new();
            }
        };
        if contents.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(err) => {
                warn!("failed to parse {}: {err}", path.display());
                Vec::new()
            }
        }
    }

    fn write_array<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(items)?;
        fs::write(self.data_dir.join(file), json)?;
        Ok(())
    }
}
