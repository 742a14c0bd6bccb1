//! Core data models for spendview
//!
//! Expenses, the categories and sources they refer to, money amounts and
//! reporting periods.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod source;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use expense::{CategoryRef, ExpenseRecord, ExpenseRow, SourceRef};
pub use ids::{CategoryId, ExpenseId, SourceId};
pub use money::Money;
pub use period::Period;
pub use source::Source;
