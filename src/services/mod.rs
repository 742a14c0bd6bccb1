//! Service layer for spendview
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, reference checks and cross-entity operations.

pub mod category;
pub mod expense;
pub mod source;

pub use category::CategoryService;
pub use expense::{ExpenseService, ExpenseUpdate, NewExpense};
pub use source::SourceService;
