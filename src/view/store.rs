//! Expense store
//!
//! The single owner of the view state for one screen: the active period, the
//! last fetched snapshot, the filter and the sort order. Every change goes
//! through a method here and recomposes the [`ViewModel`] on the spot.

use crate::error::{SpendError, SpendResult};
use crate::models::{ExpenseId, ExpenseRecord, Period};
use crate::services::expense::{ExpenseUpdate, NewExpense};

use super::compose::{compose, ViewModel};
use super::filter::FilterSpec;
use super::sort::SortOrder;

/// Persistence collaborator the store reads from and mutates through
pub trait ExpenseBackend {
    /// Authoritative read of every expense inside `period`
    fn fetch_expenses(&self, period: Period) -> SpendResult<Vec<ExpenseRecord>>;

    fn create_expense(&self, input: NewExpense) -> SpendResult<ExpenseRecord>;

    fn update_expense(&self, id: ExpenseId, update: ExpenseUpdate) -> SpendResult<ExpenseRecord>;

    fn delete_expense(&self, id: ExpenseId) -> SpendResult<ExpenseRecord>;
}

/// Explicitly scoped holder of the expense view state
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    period: Period,
    records: Vec<ExpenseRecord>,
    filter: FilterSpec,
    sort: SortOrder,
    view: ViewModel,
    stale: bool,
    generation: u64,
}

impl ExpenseStore {
    /// Create an empty store; call [`refresh`](Self::refresh) to load data
    pub fn new(period: Period, sort: SortOrder) -> Self {
        Self {
            period,
            records: Vec::new(),
            filter: FilterSpec::default(),
            sort,
            view: ViewModel::default(),
            stale: true,
            generation: 0,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// The full snapshot for the active period
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// True until a snapshot has been loaded after the last mutation
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of snapshots accepted so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the snapshot with freshly fetched records
    ///
    /// Every record is validated first; on failure the previous snapshot is
    /// kept untouched.
    pub fn replace_records(&mut self, records: Vec<ExpenseRecord>) -> SpendResult<&ViewModel> {
        for record in &records {
            record.validate().map_err(|e| SpendError::InvalidRecord {
                id: record.id.to_string(),
                reason: e.to_string(),
            })?;
        }

        self.records = records;
        self.stale = false;
        self.generation += 1;
        Ok(self.recompose())
    }

    /// Fetch the active period from `backend` and recompose
    pub fn refresh<B: ExpenseBackend + ?Sized>(&mut self, backend: &B) -> SpendResult<&ViewModel> {
        let records = backend.fetch_expenses(self.period).map_err(|e| {
            tracing::warn!(period = %self.period, error = %e, "expense refresh failed");
            e
        })?;
        tracing::debug!(period = %self.period, count = records.len(), "fetched expenses");
        self.replace_records(records)
    }

    /// Switch to another period and load it
    pub fn set_period<B: ExpenseBackend + ?Sized>(
        &mut self,
        period: Period,
        backend: &B,
    ) -> SpendResult<&ViewModel> {
        if period != self.period {
            self.period = period;
            self.stale = true;
        }
        self.refresh(backend)
    }

    pub fn set_filter(&mut self, filter: FilterSpec) -> &ViewModel {
        self.filter = filter;
        self.recompose()
    }

    /// Edit the filter in place, e.g. to toggle one category
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut FilterSpec)) -> &ViewModel {
        edit(&mut self.filter);
        self.recompose()
    }

    pub fn reset_filter(&mut self) -> &ViewModel {
        self.filter.reset();
        self.recompose()
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> &ViewModel {
        self.sort = sort;
        self.recompose()
    }

    /// Create through the backend, then re-fetch the snapshot
    pub fn create_expense<B: ExpenseBackend + ?Sized>(
        &mut self,
        backend: &B,
        input: NewExpense,
    ) -> SpendResult<ExpenseRecord> {
        let created = backend.create_expense(input)?;
        self.invalidate_and_refresh(backend)?;
        Ok(created)
    }

    /// Update through the backend, then re-fetch the snapshot
    pub fn update_expense<B: ExpenseBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> SpendResult<ExpenseRecord> {
        let updated = backend.update_expense(id, update)?;
        self.invalidate_and_refresh(backend)?;
        Ok(updated)
    }

    /// Delete through the backend, then re-fetch the snapshot
    pub fn delete_expense<B: ExpenseBackend + ?Sized>(
        &mut self,
        backend: &B,
        id: ExpenseId,
    ) -> SpendResult<ExpenseRecord> {
        let deleted = backend.delete_expense(id)?;
        self.invalidate_and_refresh(backend)?;
        Ok(deleted)
    }

    fn invalidate_and_refresh<B: ExpenseBackend + ?Sized>(&mut self, backend: &B) -> SpendResult<()> {
        self.stale = true;
        self.refresh(backend)?;
        Ok(())
    }

    fn recompose(&mut self) -> &ViewModel {
        self.view = compose(&self.records, &self.filter, self.sort);
        &self.view
    }
}
