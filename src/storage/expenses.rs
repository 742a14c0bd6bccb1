//! Expense repository for JSON storage
//!
//! Manages loading and saving expense rows to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;
use crate::models::{CategoryId, ExpenseId, ExpenseRow, Period, SourceId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseRow>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, ExpenseRow>>,
}

/// Newest date first, then most recently created first
fn newest_first(rows: &mut [ExpenseRow]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    ///
    /// A row with a malformed amount or date fails the whole load.
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for row in file_data.expenses {
            data.insert(row.id, row);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<ExpenseRow>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<ExpenseRow>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Get the expenses dated inside `period`, newest first
    pub fn get_by_period(&self, period: Period) -> Result<Vec<ExpenseRow>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data
            .values()
            .filter(|row| period.contains(row.date))
            .cloned()
            .collect();
        newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Find expenses whose id starts with `prefix`, with or without `exp-`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<ExpenseRow>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let needle = prefix.trim().to_lowercase();
        Ok(data
            .values()
            .filter(|row| {
                row.id.to_string().starts_with(&needle)
                    || row.id.as_uuid().to_string().starts_with(&needle)
            })
            .cloned()
            .collect())
    }

    pub fn upsert(&self, row: ExpenseRow) -> Result<(), SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(row.id, row);
        Ok(())
    }

    /// Delete an expense, returning the removed row
    pub fn delete(&self, id: ExpenseId) -> Result<Option<ExpenseRow>, SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    /// Clear `category_id` on every expense pointing at `category_id`
    ///
    /// Returns the number of expenses touched.
    pub fn detach_category(&self, category_id: CategoryId) -> Result<usize, SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut touched = 0;
        for row in data.values_mut() {
            if row.category_id == Some(category_id) {
                row.category_id = None;
                touched += 1;
            }
        }
        Ok(touched)
    }

    /// Clear `source_id` on every expense pointing at `source_id`
    pub fn detach_source(&self, source_id: SourceId) -> Result<usize, SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut touched = 0;
        for row in data.values_mut() {
            if row.source_id == Some(source_id) {
                row.source_id = None;
                touched += 1;
            }
        }
        Ok(touched)
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
