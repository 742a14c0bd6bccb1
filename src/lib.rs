//! spendview - personal expense tracking from the terminal
//!
//! Expenses are recorded against user-defined categories and funding
//! sources. For a month or a year, the view layer filters them by category,
//! source and amount range, sorts them, and derives totals, bounds and
//! per-category breakdowns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, sources, money, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Validation and persistence of mutations
//! - `view`: Filter, sort, aggregate and the expense store
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use spendview::config::{SpendPaths, Settings};
//! use spendview::services::ExpenseService;
//! use spendview::storage::Storage;
//! use spendview::view::{ExpenseStore, FilterSpec, SortOrder};
//! use spendview::models::{Money, Period};
//!
//! let paths = SpendPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let service = ExpenseService::new(&storage, &settings);
//!
//! let mut store = ExpenseStore::new(Period::current_month(), SortOrder::NewestFirst);
//! store.refresh(&service)?;
//! let view = store.set_filter(FilterSpec::new().min_amount(Money::from_units(10)));
//! println!("{} visible, total {}", view.visible.len(), view.aggregates.total);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod view;

pub use error::{SpendError, SpendResult};
