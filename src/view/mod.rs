//! Expense view model
//!
//! Turns a raw expense snapshot plus user-chosen filters and sort order into
//! the list that is shown and the summary figures derived from it.
//!
//! # Architecture
//!
//! - `filter`: category, source and amount-range predicates
//! - `sort`: the four fixed orderings
//! - `aggregate`: min/max/total and per-category/per-source subtotals
//! - `compose`: filter → sort → aggregate, plus unfiltered bounds
//! - `store`: the state holder that owns one snapshot and recomposes on change
//!
//! Everything except the store is a pure function of its inputs.

pub mod aggregate;
pub mod compose;
pub mod filter;
pub mod sort;
pub mod store;

pub use aggregate::{aggregate, Aggregates, Bounds, CategoryTotal, SourceTotal};
pub use compose::{compose, ViewModel};
pub use filter::{apply_filter, FilterSpec};
pub use sort::{apply_sort, SortOrder};
pub use store::{ExpenseBackend, ExpenseStore};
