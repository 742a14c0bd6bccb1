//! Export of the current expense view
//!
//! - CSV: the visible expenses or the per-category totals
//! - JSON: the whole composed view with the filter and sort behind it

pub mod csv;
pub mod json;

pub use self::csv::{export_category_totals_csv, export_expenses_csv};
pub use self::json::{export_view_json, ViewExport, EXPORT_SCHEMA_VERSION};
