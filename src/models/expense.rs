//! Expense model
//!
//! Two shapes of the same expense exist. [`ExpenseRow`] is what storage keeps:
//! plain foreign keys. [`ExpenseRecord`] is what the view layer consumes: the
//! row joined with the category and source it refers to.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{CategoryId, ExpenseId, SourceId};
use super::money::Money;
use super::source::Source;

/// Stored expense with plain references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub amount: Money,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub source_id: Option<SourceId>,
}

impl ExpenseRow {
    /// Create a new expense row
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            description: None,
            date,
            created_at: Utc::now(),
            category_id: None,
            source_id: None,
        }
    }
}

/// The category fields embedded in an expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
        }
    }
}

/// The source fields embedded in an expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: SourceId,
    pub name: String,
    pub balance: Money,
}

impl From<&Source> for SourceRef {
    fn from(source: &Source) -> Self {
        Self {
            id: source.id,
            name: source.name.clone(),
            balance: source.balance,
        }
    }
}

/// An expense as seen by the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: Money,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub category: Option<CategoryRef>,
    pub source: Option<SourceRef>,
}

impl ExpenseRecord {
    /// Create a record with no category or source attached
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            description: None,
            date,
            created_at: Utc::now(),
            category: None,
            source: None,
        }
    }

    /// Attach a category
    pub fn with_category(mut self, category: &Category) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a source
    pub fn with_source(mut self, source: &Source) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    pub fn source_id(&self) -> Option<SourceId> {
        self.source.as_ref().map(|s| s.id)
    }

    /// Check that the record is safe to aggregate
    ///
    /// Amounts are signed: a negative row (a refund) is accepted here even
    /// though new expenses must be positive.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountOutOfRange(self.amount));
        }

        if let Some(category) = &self.category {
            if category.name.trim().is_empty() {
                return Err(ExpenseValidationError::UnnamedCategory);
            }
        }

        Ok(())
    }

    /// Join a stored row with its category and source
    pub fn from_row(row: ExpenseRow, category: Option<&Category>, source: Option<&Source>) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            description: row.description,
            date: row.date,
            created_at: row.created_at,
            category: category.map(CategoryRef::from),
            source: source.map(SourceRef::from),
        }
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.amount)?;
        if let Some(category) = &self.category {
            write!(f, " [{}]", category.name)?;
        }
        Ok(())
    }
}

/// Validation errors for expense records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    AmountOutOfRange(Money),
    UnnamedCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountOutOfRange(amount) => write!(
                f,
                "amount {} exceeds the limit of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::UnnamedCategory => write!(f, "linked category has no name"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
