//! Storage initialization
//!
//! Handles first-run setup and default data creation

use chrono::{Duration, Utc};

use crate::config::paths::SpendPaths;
use crate::error::SpendError;
use crate::models::{Category, DEFAULT_CATEGORIES};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the data directory and seeds the default categories. An existing
/// categories file is left alone. Returns whether defaults were written.
pub fn initialize_storage(paths: &SpendPaths) -> Result<bool, SpendError> {
    paths.ensure_directories()?;

    if paths.categories_file().exists() {
        return Ok(false);
    }

    let data = CategoryData {
        categories: default_categories(),
    };
    write_json_atomic(paths.categories_file(), &data)?;
    tracing::info!(count = data.categories.len(), "seeded default categories");

    Ok(true)
}

/// Build the default categories
///
/// Creation times are staggered so the newest-first listing is stable.
pub fn default_categories() -> Vec<Category> {
    let now = Utc::now();
    let count = DEFAULT_CATEGORIES.len() as i64;

    DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, (name, color))| {
            let mut category = Category::new(*name, *color);
            category.created_at = now - Duration::milliseconds(count - i as i64);
            category
        })
        .collect()
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SpendPaths) -> bool {
    !paths.categories_file().exists()
}
