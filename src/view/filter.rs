//! Filter predicate engine
//!
//! A [`FilterSpec`] narrows a record set by category membership, source
//! membership and an inclusive amount range. Every unset dimension accepts
//! everything; active dimensions are ANDed together.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, ExpenseRecord, Money, SourceId};

/// Declarative inclusion constraints over expense records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Accepted category ids; empty means any category (or none)
    pub category_ids: BTreeSet<CategoryId>,
    /// Accepted source ids; empty means any source (or none)
    pub source_ids: BTreeSet<SourceId>,
    /// Inclusive lower bound on amount
    pub min_amount: Option<Money>,
    /// Inclusive upper bound on amount
    pub max_amount: Option<Money>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept records in this category (in addition to any already accepted)
    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_ids.insert(id);
        self
    }

    /// Accept records paid from this source
    pub fn source(mut self, id: SourceId) -> Self {
        self.source_ids.insert(id);
        self
    }

    pub fn min_amount(mut self, amount: Money) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn max_amount(mut self, amount: Money) -> Self {
        self.max_amount = Some(amount);
        self
    }

    /// True when no dimension is constrained
    pub fn is_empty(&self) -> bool {
        self.category_ids.is_empty()
            && self.source_ids.is_empty()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }

    /// Drop every constraint
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check or uncheck a category; returns whether it is now selected
    pub fn toggle_category(&mut self, id: CategoryId) -> bool {
        if !self.category_ids.remove(&id) {
            self.category_ids.insert(id);
            true
        } else {
            false
        }
    }

    /// Check or uncheck a source; returns whether it is now selected
    pub fn toggle_source(&mut self, id: SourceId) -> bool {
        if !self.source_ids.remove(&id) {
            self.source_ids.insert(id);
            true
        } else {
            false
        }
    }

    /// Evaluate every active constraint against one record
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if !self.category_ids.is_empty() {
            match record.category_id() {
                Some(id) if self.category_ids.contains(&id) => {}
                _ => return false,
            }
        }

        if !self.source_ids.is_empty() {
            match record.source_id() {
                Some(id) if self.source_ids.contains(&id) => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_amount {
            if record.amount < min {
                return false;
            }
        }

        if let Some(max) = self.max_amount {
            if record.amount > max {
                return false;
            }
        }

        true
    }
}

/// Keep the records accepted by `spec`, preserving input order
pub fn apply_filter(records: &[ExpenseRecord], spec: &FilterSpec) -> Vec<ExpenseRecord> {
    records.iter().filter(|r| spec.matches(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Source};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn record(cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(Money::from_cents(cents), date())
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let food = Category::new("Food", "#FF6347");
        let records = vec![record(1000).with_category(&food), record(2000), record(3000)];

        let spec = FilterSpec::new();
        assert!(spec.is_empty());
        assert_eq!(apply_filter(&records, &spec), records);
    }

    #[test]
    fn test_empty_records_give_empty_result() {
        let spec = FilterSpec::new()
            .category(CategoryId::new())
            .min_amount(Money::from_cents(1));
        assert!(apply_filter(&[], &spec).is_empty());
    }

    #[test]
    fn test_category_filter_excludes_uncategorized() {
        let food = Category::new("Food", "#FF6347");
        let transport = Category::new("Transport", "#4682B4");
        let records = vec![
            record(1000).with_category(&food),
            record(2000).with_category(&transport),
            record(3000),
        ];

        let visible = apply_filter(&records, &FilterSpec::new().category(food.id));
        assert_eq!(visible, vec![records[0].clone()]);
    }

    #[test]
    fn test_source_filter_excludes_sourceless() {
        let card = Source::new("Card", Money::zero());
        let cash = Source::new("Cash", Money::zero());
        let records = vec![
            record(1000).with_source(&card),
            record(2000).with_source(&cash),
            record(3000),
        ];

        let spec = FilterSpec::new().source(card.id).source(cash.id);
        let visible = apply_filter(&records, &spec);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| r.source.is_some()));
    }

    #[test]
    fn test_amount_range_is_inclusive() {
        let records = vec![record(1000), record(1500), record(2000), record(2500), record(3000)];
        let spec = FilterSpec::new()
            .min_amount(Money::from_cents(1500))
            .max_amount(Money::from_cents(2500));

        let amounts: Vec<i64> = apply_filter(&records, &spec)
            .iter()
            .map(|r| r.amount.cents())
            .collect();
        assert_eq!(amounts, vec![1500, 2000, 2500]);
    }

    #[test]
    fn test_constraints_combine_with_and() {
        let food = Category::new("Food", "#FF6347");
        let card = Source::new("Card", Money::zero());
        let records = vec![
            record(1000).with_category(&food).with_source(&card),
            record(5000).with_category(&food).with_source(&card),
            record(1000).with_category(&food),
            record(1000).with_source(&card),
        ];

        let spec = FilterSpec::new()
            .category(food.id)
            .source(card.id)
            .max_amount(Money::from_cents(2000));
        let visible = apply_filter(&records, &spec);
        assert_eq!(visible, vec![records[0].clone()]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![record(1000), record(2000)];
        let before = records.clone();
        let _ = apply_filter(&records, &FilterSpec::new().min_amount(Money::from_cents(1500)));
        assert_eq!(records, before);
    }

    #[test]
    fn test_toggle_and_reset() {
        let id = CategoryId::new();
        let mut spec = FilterSpec::new();

        assert!(spec.toggle_category(id));
        assert!(spec.category_ids.contains(&id));
        assert!(!spec.toggle_category(id));
        assert!(spec.category_ids.is_empty());

        let source = SourceId::new();
        spec.toggle_source(source);
        spec.min_amount = Some(Money::from_cents(10));
        assert!(!spec.is_empty());

        spec.reset();
        assert!(spec.is_empty());
    }
}
