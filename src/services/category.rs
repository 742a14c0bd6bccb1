//! Category service
//!
//! CRUD for categories. Deleting a category leaves its expenses in place and
//! uncategorized.

use crate::error::{SpendError, SpendResult};
use crate::models::{Category, CategoryId};
use crate::storage::init::default_categories;
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str, color: &str) -> SpendResult<Category> {
        let name = name.trim();
        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(SpendError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, color.trim());
        category
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// All categories, most recently created first
    pub fn list(&self) -> SpendResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn get(&self, id: CategoryId) -> SpendResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by ID or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> SpendResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(id)? {
                return Ok(Some(category));
            }
        }
        self.storage.categories.get_by_name(identifier)
    }

    /// Rename and/or recolor a category
    pub fn update(
        &self,
        id: CategoryId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> SpendResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| SpendError::category_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
                if existing.id != id {
                    return Err(SpendError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
            }
            category.name = new_name.to_string();
        }

        if let Some(new_color) = color {
            category.color = new_color.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "updated category");
        Ok(category)
    }

    /// Delete a category, detaching it from every expense
    ///
    /// Returns the deleted category and the number of expenses detached.
    pub fn delete(&self, id: CategoryId) -> SpendResult<(Category, usize)> {
        let category = self
            .storage
            .categories
            .delete(id)?
            .ok_or_else(|| SpendError::category_not_found(id.to_string()))?;

        let detached = self.storage.expenses.detach_category(id)?;
        if detached > 0 {
            tracing::warn!(
                category = %category.name,
                expenses = detached,
                "detached deleted category from expenses"
            );
            self.storage.expenses.save()?;
        }
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "deleted category");
        Ok((category, detached))
    }

    /// Create whichever default categories are missing (matched by name)
    pub fn seed_defaults(&self) -> SpendResult<Vec<Category>> {
        let mut created = Vec::new();
        for category in default_categories() {
            if self.storage.categories.get_by_name(&category.name)?.is_some() {
                continue;
            }
            self.storage.categories.upsert(category.clone())?;
            created.push(category);
        }

        if !created.is_empty() {
            self.storage.categories.save()?;
            tracing::info!(count = created.len(), "seeded default categories");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::models::{ExpenseRow, Money, DEFAULT_CATEGORIES};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create("  Groceries ", "#00FF00").unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_duplicates_and_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create("Food", "#FF6347").unwrap();

        assert!(matches!(
            service.create("food", "#000"),
            Err(SpendError::Duplicate { .. })
        ));
        assert!(service.create("", "#000").unwrap_err().is_validation());
        assert!(service.create("Rent", "blue").unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let category = service.create("Travel", "#123").unwrap();

        assert_eq!(service.find("travel").unwrap().unwrap().id, category.id);
        assert_eq!(
            service.find(&category.id.to_string()).unwrap().unwrap().id,
            category.id
        );
        assert!(service.find("Nope").unwrap().is_none());
    }

    #[test]
    fn test_update_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.create("Food", "#FF6347").unwrap();
        service.create("Rent", "#000").unwrap();

        let updated = service.update(food.id, Some("Dining"), Some("#abc")).unwrap();
        assert_eq!(updated.name, "Dining");
        assert_eq!(updated.color, "#abc");

        assert!(matches!(
            service.update(food.id, Some("rent"), None),
            Err(SpendError::Duplicate { .. })
        ));
        // Renaming to the same name with different case is allowed
        assert!(service.update(food.id, Some("DINING"), None).is_ok());
    }

    #[test]
    fn test_delete_detaches_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.create("Food", "#FF6347").unwrap();

        let mut row = ExpenseRow::new(
            Money::from_cents(500),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        row.category_id = Some(food.id);
        let row_id = row.id;
        storage.expenses.upsert(row).unwrap();

        let (deleted, detached) = service.delete(food.id).unwrap();
        assert_eq!(deleted.id, food.id);
        assert_eq!(detached, 1);
        assert_eq!(storage.expenses.get(row_id).unwrap().unwrap().category_id, None);
        assert!(service.delete(food.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_seed_defaults_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create("Food", "#111").unwrap();

        let created = service.seed_defaults().unwrap();
        assert_eq!(created.len(), DEFAULT_CATEGORIES.len() - 1);
        assert!(service.seed_defaults().unwrap().is_empty());
        assert_eq!(service.list().unwrap().len(), DEFAULT_CATEGORIES.len());
    }
}
