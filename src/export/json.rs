//! JSON export
//!
//! Writes one composed view together with the filter and sort that produced
//! it, so the export can be read back and understood on its own.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SpendResult;
use crate::models::Period;
use crate::view::{FilterSpec, SortOrder, ViewModel};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A self-describing snapshot of one view
#[derive(Debug, Clone, Serialize)]
pub struct ViewExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub period: Period,
    pub filter: &'a FilterSpec,
    pub sort: SortOrder,
    /// Size of the unfiltered snapshot
    pub total_count: usize,
    pub view: &'a ViewModel,
}

impl<'a> ViewExport<'a> {
    pub fn new(
        period: Period,
        filter: &'a FilterSpec,
        sort: SortOrder,
        total_count: usize,
        view: &'a ViewModel,
    ) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            period,
            filter,
            sort,
            total_count,
            view,
        }
    }
}

/// Write the export as pretty JSON
pub fn export_view_json<W: Write>(export: &ViewExport<'_>, writer: &mut W) -> SpendResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)?;
    writeln!(writer)?;
    Ok(())
}
