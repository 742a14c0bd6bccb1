//! View model composer
//!
//! `bounds` are taken from the full record set while `aggregates` follow the
//! filtered list, so a range slider keeps its global limits as the visible
//! totals shrink.

use serde::Serialize;

use super::aggregate::{aggregate, Aggregates, Bounds};
use super::filter::{apply_filter, FilterSpec};
use super::sort::{apply_sort, SortOrder};
use crate::models::ExpenseRecord;

/// Everything the presentation layer needs to render one screen
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewModel {
    /// Filtered and sorted records
    pub visible: Vec<ExpenseRecord>,
    /// Min/max amount of the unfiltered record set
    pub bounds: Bounds,
    /// Figures over `visible`
    pub aggregates: Aggregates,
}

impl ViewModel {
    /// Number of records hidden by the filter
    pub fn hidden_count(&self, all: &[ExpenseRecord]) -> usize {
        all.len().saturating_sub(self.visible.len())
    }
}

/// Filter, then sort, then aggregate
pub fn compose(all: &[ExpenseRecord], spec: &FilterSpec, order: SortOrder) -> ViewModel {
    let visible = apply_sort(&apply_filter(all, spec), order);
    let aggregates = aggregate(&visible);

    tracing::debug!(
        total = all.len(),
        visible = visible.len(),
        %order,
        "composed expense view"
    );

    ViewModel {
        bounds: Bounds::of(all),
        aggregates,
        visible,
    }
}
