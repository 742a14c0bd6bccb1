//! Expense service
//!
//! Validates and persists expense mutations, and joins stored rows with their
//! category and source to produce the records the view layer consumes.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{SpendError, SpendResult};
use crate::models::{
    Category, CategoryId, ExpenseId, ExpenseRecord, ExpenseRow, Money, Period, Source, SourceId,
};
use crate::storage::Storage;
use crate::view::{aggregate, CategoryTotal, ExpenseBackend};

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub source_id: Option<SourceId>,
}

impl NewExpense {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            amount,
            date,
            description: None,
            category_id: None,
            source_id: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn source(mut self, source_id: SourceId) -> Self {
        self.source_id = Some(source_id);
        self
    }
}

/// Partial update of an expense
///
/// The nested options follow one rule: `None` leaves the field alone,
/// `Some(None)` clears it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<CategoryId>>,
    pub source_id: Option<Option<SourceId>>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.source_id.is_none()
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    track_sources: bool,
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            track_sources: settings.track_sources,
        }
    }

    /// Create a new expense
    pub fn create(&self, input: NewExpense) -> SpendResult<ExpenseRecord> {
        let mut row = ExpenseRow::new(input.amount, input.date);
        row.description = clean_description(input.description);
        row.category_id = input.category_id;
        row.source_id = input.source_id;

        self.check_row(&row)?;

        self.storage.expenses.upsert(row.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %row.id, amount = %row.amount, date = %row.date, "created expense");
        self.join(row)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> SpendResult<Option<ExpenseRecord>> {
        match self.storage.expenses.get(id)? {
            Some(row) => Ok(Some(self.join(row)?)),
            None => Ok(None),
        }
    }

    /// Find an expense by full ID or by a unique ID prefix
    pub fn find(&self, identifier: &str) -> SpendResult<Option<ExpenseRecord>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.get(id);
        }

        let mut matches = self.storage.expenses.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(self.join(matches.remove(0))?)),
            n => Err(SpendError::Validation(format!(
                "'{}' matches {} expenses; use a longer id",
                identifier, n
            ))),
        }
    }

    /// Every expense inside `period`, newest first
    pub fn fetch(&self, period: Period) -> SpendResult<Vec<ExpenseRecord>> {
        let rows = self.storage.expenses.get_by_period(period)?;
        tracing::debug!(%period, count = rows.len(), "fetching expenses");
        self.join_all(rows)
    }

    /// Per-category totals for `period`
    pub fn category_totals(&self, period: Period) -> SpendResult<Vec<CategoryTotal>> {
        Ok(aggregate(&self.fetch(period)?).by_category)
    }

    /// Update an expense
    pub fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> SpendResult<ExpenseRecord> {
        let mut row = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| SpendError::expense_not_found(id.to_string()))?;

        if let Some(amount) = update.amount {
            row.amount = amount;
        }
        if let Some(date) = update.date {
            row.date = date;
        }
        if let Some(description) = update.description {
            row.description = clean_description(description);
        }
        if let Some(category_id) = update.category_id {
            row.category_id = category_id;
        }
        if let Some(source_id) = update.source_id {
            row.source_id = source_id;
        }

        self.check_row(&row)?;

        self.storage.expenses.upsert(row.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %row.id, "updated expense");
        self.join(row)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> SpendResult<ExpenseRecord> {
        let row = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| SpendError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        tracing::info!(id = %row.id, "deleted expense");
        self.join(row)
    }

    /// Check a row against the expense form rules
    fn check_row(&self, row: &ExpenseRow) -> SpendResult<()> {
        if !row.amount.is_positive() {
            return Err(SpendError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        if !row.amount.is_within_limit() {
            return Err(SpendError::Validation(format!(
                "Amount must not exceed {}",
                Money::MAX_AMOUNT
            )));
        }

        if let Some(category_id) = row.category_id {
            self.storage
                .categories
                .get(category_id)?
                .ok_or_else(|| SpendError::category_not_found(category_id.to_string()))?;
        }

        match row.source_id {
            Some(source_id) => {
                self.storage
                    .sources
                    .get(source_id)?
                    .ok_or_else(|| SpendError::source_not_found(source_id.to_string()))?;
            }
            None if self.track_sources => {
                return Err(SpendError::Validation(
                    "A source is required while source tracking is enabled".into(),
                ));
            }
            None => {}
        }

        Ok(())
    }

    fn join(&self, row: ExpenseRow) -> SpendResult<ExpenseRecord> {
        Ok(self.join_all(vec![row])?.remove(0))
    }

    /// Resolve category and source references; dangling ones become `None`
    fn join_all(&self, rows: Vec<ExpenseRow>) -> SpendResult<Vec<ExpenseRecord>> {
        let categories: HashMap<CategoryId, Category> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let sources: HashMap<SourceId, Source> = self
            .storage
            .sources
            .get_all()?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let category = row.category_id.and_then(|id| {
                    let found = categories.get(&id);
                    if found.is_none() {
                        tracing::warn!(expense = %row.id, category = %id, "expense refers to a missing category");
                    }
                    found
                });
                let source = row.source_id.and_then(|id| {
                    let found = sources.get(&id);
                    if found.is_none() {
                        tracing::warn!(expense = %row.id, source = %id, "expense refers to a missing source");
                    }
                    found
                });
                ExpenseRecord::from_row(row, category, source)
            })
            .collect())
    }
}

impl ExpenseBackend for ExpenseService<'_> {
    fn fetch_expenses(&self, period: Period) -> SpendResult<Vec<ExpenseRecord>> {
        self.fetch(period)
    }

    fn create_expense(&self, input: NewExpense) -> SpendResult<ExpenseRecord> {
        self.create(input)
    }

    fn update_expense(&self, id: ExpenseId, update: ExpenseUpdate) -> SpendResult<ExpenseRecord> {
        self.update(id, update)
    }

    fn delete_expense(&self, id: ExpenseId) -> SpendResult<ExpenseRecord> {
        self.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::view::{ExpenseStore, FilterSpec, SortOrder};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn untracked() -> Settings {
        Settings {
            track_sources: false,
            ..Settings::default()
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_create_joins_category_and_source() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", "#FF6347");
        let card = Source::new("Card", Money::from_units(100));
        storage.categories.upsert(food.clone()).unwrap();
        storage.sources.upsert(card.clone()).unwrap();

        let service = ExpenseService::new(&storage, &Settings::default());
        let record = service
            .create(
                NewExpense::new(Money::from_cents(1299), date(1, 4))
                    .description("  Lunch  ")
                    .category(food.id)
                    .source(card.id),
            )
            .unwrap();

        assert_eq!(record.description.as_deref(), Some("Lunch"));
        assert_eq!(record.category.as_ref().unwrap().name, "Food");
        assert_eq!(record.source.as_ref().unwrap().name, "Card");
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &untracked());

        for cents in [0, -500] {
            let err = service
                .create(NewExpense::new(Money::from_cents(cents), date(1, 1)))
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_create_requires_source_when_tracking() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &Settings::default());

        let err = service
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)))
            .unwrap_err();
        assert!(err.is_validation());

        let relaxed = ExpenseService::new(&storage, &untracked());
        assert!(relaxed
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)))
            .is_ok());
    }

    #[test]
    fn test_create_rejects_unknown_references() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &untracked());

        let err = service
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)).category(CategoryId::new()))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)).source(SourceId::new()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_fetch_is_scoped_and_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &untracked());
        for (cents, m, d) in [(100, 1, 5), (200, 1, 25), (300, 2, 1)] {
            service
                .create(NewExpense::new(Money::from_cents(cents), date(m, d)))
                .unwrap();
        }

        let january = service.fetch(Period::month(2025, 1).unwrap()).unwrap();
        let amounts: Vec<i64> = january.iter().map(|r| r.amount.cents()).collect();
        assert_eq!(amounts, vec![200, 100]);
    }

    #[test]
    fn test_update_and_clear_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", "#FF6347");
        storage.categories.upsert(food.clone()).unwrap();
        let service = ExpenseService::new(&storage, &untracked());

        let created = service
            .create(
                NewExpense::new(Money::from_cents(100), date(1, 1))
                    .description("Snack")
                    .category(food.id),
            )
            .unwrap();

        let updated = service
            .update(
                created.id,
                ExpenseUpdate {
                    amount: Some(Money::from_cents(250)),
                    description: Some(None),
                    category_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount.cents(), 250);
        assert_eq!(updated.description, None);
        assert_eq!(updated.category, None);

        let err = service
            .update(
                created.id,
                ExpenseUpdate {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(created.id).unwrap().unwrap().amount.cents(), 250);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &untracked());
        let created = service
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)))
            .unwrap();

        service.delete(created.id).unwrap();
        assert!(service.get(created.id).unwrap().is_none());
        assert!(service.delete(created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_dangling_reference_is_dropped() {
        let (_temp_dir, storage) = create_test_storage();
        let mut row = ExpenseRow::new(Money::from_cents(100), date(1, 1));
        row.category_id = Some(CategoryId::new());
        let id = row.id;
        storage.expenses.upsert(row).unwrap();

        let service = ExpenseService::new(&storage, &untracked());
        let record = service.get(id).unwrap().unwrap();
        assert_eq!(record.category, None);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage, &untracked());
        let created = service
            .create(NewExpense::new(Money::from_cents(100), date(1, 1)))
            .unwrap();

        let found = service.find(&created.id.short()).unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(
            service.find(&created.id.to_string()).unwrap().unwrap().id,
            created.id
        );
        assert!(service.find("exp-zzzz").unwrap().is_none());
    }

    #[test]
    fn test_category_totals_match_aggregate() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", "#FF6347");
        storage.categories.upsert(food.clone()).unwrap();
        let service = ExpenseService::new(&storage, &untracked());
        service
            .create(NewExpense::new(Money::from_cents(300), date(1, 2)).category(food.id))
            .unwrap();
        service
            .create(NewExpense::new(Money::from_cents(200), date(1, 3)))
            .unwrap();

        let totals = service.category_totals(Period::month(2025, 1).unwrap()).unwrap();
        let sum: Money = totals.iter().map(|t| t.total).sum();
        assert_eq!(sum.cents(), 500);
        assert!(totals.iter().any(|t| t.name == "Food" && t.total.cents() == 300));
    }

    #[test]
    fn test_store_over_service() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", "#FF6347");
        storage.categories.upsert(food.clone()).unwrap();
        let service = ExpenseService::new(&storage, &untracked());

        let mut store = ExpenseStore::new(Period::month(2025, 1).unwrap(), SortOrder::NewestFirst);
        store.refresh(&service).unwrap();
        store
            .create_expense(
                &service,
                NewExpense::new(Money::from_cents(500), date(1, 9)).category(food.id),
            )
            .unwrap();
        store
            .create_expense(&service, NewExpense::new(Money::from_cents(900), date(1, 10)))
            .unwrap();

        let view = store.set_filter(FilterSpec::new().category(food.id));
        assert_eq!(view.visible.len(), 1);
        assert_eq!(view.aggregates.total.cents(), 500);
        assert_eq!(view.bounds.max.cents(), 900);
    }
}
