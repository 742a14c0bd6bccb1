//! Storage layer for spendview
//!
//! JSON tables with atomic writes: one file each for expenses, categories
//! and sources.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod sources;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use sources::SourceRepository;

use crate::config::paths::SpendPaths;
use crate::error::SpendError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub sources: SourceRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            sources: SourceRepository::new(paths.sources_file()),
            paths,
        })
    }

    /// Create the storage and load every table
    pub fn open(paths: SpendPaths) -> Result<Self, SpendError> {
        let mut storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendError> {
        self.categories.load()?;
        self.sources.load()?;
        self.expenses.load()?;
        tracing::debug!(base_dir = %self.paths.base_dir().display(), "loaded storage");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendError> {
        self.categories.save()?;
        self.sources.save()?;
        self.expenses.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
