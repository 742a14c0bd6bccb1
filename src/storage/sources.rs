//! Source repository for JSON storage
//!
//! Manages loading and saving funding sources to sources.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;
use crate::models::{Source, SourceId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SourceData {
    sources: Vec<Source>,
}

/// Repository for source persistence
pub struct SourceRepository {
    path: PathBuf,
    data: RwLock<HashMap<SourceId, Source>>,
}

impl SourceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: SourceData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for source in file_data.sources {
            data.insert(source.id, source);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendError> {
        let file_data = SourceData {
            sources: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: SourceId) -> Result<Option<Source>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all sources, oldest first
    pub fn get_all(&self) -> Result<Vec<Source>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut sources: Vec<_> = data.values().cloned().collect();
        sources.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(sources)
    }

    /// Get a source by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Source>, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|s| s.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn upsert(&self, source: Source) -> Result<(), SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(source.id, source);
        Ok(())
    }

    pub fn delete(&self, id: SourceId) -> Result<Option<Source>, SpendError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SourceRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.json");
        let repo = SourceRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_get_all_oldest_first() {
        let (_temp_dir, repo) = create_test_repo();
        let mut older = Source::new("Checking", Money::from_units(500));
        older.created_at -= Duration::hours(2);
        let newer = Source::new("Wallet", Money::from_units(40));

        repo.upsert(newer).unwrap();
        repo.upsert(older).unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Checking", "Wallet"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let source = Source::new("Card", Money::from_cents(12_345));
        let id = source.id;
        repo.upsert(source).unwrap();
        repo.save().unwrap();

        let repo2 = SourceRepository::new(temp_dir.path().join("sources.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().balance.cents(), 12_345);
    }

    #[test]
    fn test_get_by_name_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let source = Source::new("Wallet", Money::zero());
        let id = source.id;
        repo.upsert(source).unwrap();

        assert_eq!(repo.get_by_name("wallet").unwrap().unwrap().id, id);
        assert!(repo.delete(id).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
