//! Source model
//!
//! A source is a funding bucket (a bank account, a wallet, a card) that
//! expenses can be paid from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SourceId;
use super::money::Money;

/// A funding source with its current balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier
    pub id: SourceId,

    /// Display name
    pub name: String,

    /// Current funds available in this source
    pub balance: Money,

    /// When the source was created
    pub created_at: DateTime<Utc>,
}

impl Source {
    /// Create a new source
    pub fn new(name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: SourceId::new(),
            name: name.into(),
            balance,
            created_at: Utc::now(),
        }
    }

    /// Validate the source
    pub fn validate(&self) -> Result<(), SourceValidationError> {
        if self.name.trim().is_empty() {
            return Err(SourceValidationError::EmptyName);
        }

        if self.balance.is_negative() {
            return Err(SourceValidationError::NegativeBalance(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValidationError {
    EmptyName,
    NegativeBalance(Money),
}

impl fmt::Display for SourceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Source name cannot be empty"),
            Self::NegativeBalance(balance) => {
                write!(f, "Balance must not be negative (got {})", balance)
            }
        }
    }
}

impl std::error::Error for SourceValidationError {}
