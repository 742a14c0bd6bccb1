//! Source service
//!
//! CRUD for funding sources.

use crate::error::{SpendError, SpendResult};
use crate::models::{Money, Source, SourceId};
use crate::storage::Storage;

/// Service for source management
pub struct SourceService<'a> {
    storage: &'a Storage,
}

impl<'a> SourceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new source with an opening balance
    pub fn create(&self, name: &str, balance: Money) -> SpendResult<Source> {
        let name = name.trim();
        if self.storage.sources.get_by_name(name)?.is_some() {
            return Err(SpendError::Duplicate {
                entity_type: "Source",
                identifier: name.to_string(),
            });
        }

        let source = Source::new(name, balance);
        source
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.storage.sources.upsert(source.clone())?;
        self.storage.sources.save()?;

        tracing::info!(id = %source.id, name = %source.name, "created source");
        Ok(source)
    }

    /// All sources, oldest first
    pub fn list(&self) -> SpendResult<Vec<Source>> {
        self.storage.sources.get_all()
    }

    /// Find a source by ID or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> SpendResult<Option<Source>> {
        if let Ok(id) = identifier.parse::<SourceId>() {
            if let Some(source) = self.storage.sources.get(id)? {
                return Ok(Some(source));
            }
        }
        self.storage.sources.get_by_name(identifier)
    }

    pub fn update(
        &self,
        id: SourceId,
        name: Option<&str>,
        balance: Option<Money>,
    ) -> SpendResult<Source> {
        let mut source = self
            .storage
            .sources
            .get(id)?
            .ok_or_else(|| SpendError::source_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if let Some(existing) = self.storage.sources.get_by_name(new_name)? {
                if existing.id != id {
                    return Err(SpendError::Duplicate {
                        entity_type: "Source",
                        identifier: new_name.to_string(),
                    });
                }
            }
            source.name = new_name.to_string();
        }

        if let Some(new_balance) = balance {
            source.balance = new_balance;
        }

        source
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.storage.sources.upsert(source.clone())?;
        self.storage.sources.save()?;

        tracing::info!(id = %source.id, name = %source.name, "updated source");
        Ok(source)
    }

    /// Delete a source, detaching it from every expense
    pub fn delete(&self, id: SourceId) -> SpendResult<(Source, usize)> {
        let source = self
            .storage
            .sources
            .delete(id)?
            .ok_or_else(|| SpendError::source_not_found(id.to_string()))?;

        let detached = self.storage.expenses.detach_source(id)?;
        if detached > 0 {
            tracing::warn!(
                source = %source.name,
                expenses = detached,
                "detached deleted source from expenses"
            );
            self.storage.expenses.save()?;
        }
        self.storage.sources.save()?;

        tracing::info!(id = %source.id, name = %source.name, "deleted source");
        Ok((source, detached))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::models::ExpenseRow;
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
    fn test_create_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SourceService::new(&storage);

        service.create("Checking", Money::from_units(1000)).unwrap();
        service.create("Wallet", Money::zero()).unwrap();

        let names: Vec<String> = service.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Checking", "Wallet"]);
    }

    #[test]
    fn test_negative_balance_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SourceService::new(&storage);

        assert!(service
            .create("Overdrawn", Money::from_cents(-1))
            .unwrap_err()
            .is_validation());

        let source = service.create("Card", Money::from_units(5)).unwrap();
        assert!(service
            .update(source.id, None, Some(Money::from_cents(-100)))
            .unwrap_err()
            .is_validation());
        assert_eq!(service.find("card").unwrap().unwrap().balance.units(), 5);
    }

    #[test]
    fn test_update_source() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SourceService::new(&storage);
        let source = service.create("Card", Money::from_units(5)).unwrap();

        let updated = service
            .update(source.id, Some("Credit Card"), Some(Money::from_units(50)))
            .unwrap();
        assert_eq!(updated.name, "Credit Card");
        assert_eq!(updated.balance.units(), 50);
    }

    #[test]
    fn test_delete_detaches_expenses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SourceService::new(&storage);
        let source = service.create("Card", Money::from_units(5)).unwrap();

        let mut row = ExpenseRow::new(
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        row.source_id = Some(source.id);
        let row_id = row.id;
        storage.expenses.upsert(row).unwrap();

        let (_, detached) = service.delete(source.id).unwrap();
        assert_eq!(detached, 1);
        assert_eq!(storage.expenses.get(row_id).unwrap().unwrap().source_id, None);
    }
}
