//! User settings for spendview
//!
//! Display preferences (currency, number format, decimals), whether expenses
//! must name a funding source, and the default sort order.

use serde::{Deserialize, Serialize};

use super::paths::SpendPaths;
use crate::error::SpendError;
use crate::view::SortOrder;

/// Thousands/decimal separator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// 1,234.56
    #[default]
    Comma,
    /// 1.234,56
    Dot,
}

impl NumberFormat {
    /// (thousands separator, decimal separator)
    pub fn separators(&self) -> (char, char) {
        match self {
            Self::Comma => (',', '.'),
            Self::Dot => ('.', ','),
        }
    }
}

/// User settings for spendview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub number_format: NumberFormat,

    /// Number of decimals shown (0-2)
    #[serde(default = "default_decimal_length")]
    pub decimal_length: u8,

    /// Require every new expense to name a source
    #[serde(default = "default_track_sources")]
    pub track_sources: bool,

    /// Sort order used when a command does not ask for one
    #[serde(default)]
    pub default_sort: SortOrder,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_decimal_length() -> u8 {
    2
}

fn default_track_sources() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            number_format: NumberFormat::default(),
            decimal_length: default_decimal_length(),
            track_sources: default_track_sources(),
            default_sort: SortOrder::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, SpendError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SpendError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SpendError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendPaths) -> Result<(), SpendError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), SpendError> {
        if self.decimal_length > 2 {
            return Err(SpendError::Config(format!(
                "decimal_length must be between 0 and 2, got {}",
                self.decimal_length
            )));
        }
        Ok(())
    }
}
