use crate::models::{Category, DomainError};

/// Owns the category collection. Cross-store effects of renames and deletes
/// are driven by the planner, not from here.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Swaps in a freshly loaded collection.
    pub fn replace(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.matches(name))
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(name))
    }

    pub fn add(&mut self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.contains(name) {
            return Err(DomainError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category::new(name));
        Ok(())
    }

    /// Renames in place; the first case-insensitive match wins.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), DomainError> {
        if new_name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        match self.categories.iter_mut().find(|c| c.matches(old_name)) {
            Some(category) => {
                category.name = new_name.to_string();
                Ok(())
            }
            None => Err(DomainError::CategoryNotFound(old_name.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<(), DomainError> {
        let before = self.categories.len();
        self.categories.retain(|c| !c.matches(name));
        if self.categories.len() == before {
            return Err(DomainError::CategoryNotFound(name.to_string()));
        }
        Ok(())
    }
}
