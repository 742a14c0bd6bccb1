//! Aggregation engine
//!
//! Min, max and total over a record set, plus per-category and per-source
//! subtotals. Records without a category (or source) are collected into a
//! single bucket so the subtotals always add up to `total`.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CategoryId, ExpenseRecord, Money, SourceId};

/// Label of the bucket holding records without a category
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
/// Display color of the uncategorized bucket
pub const UNCATEGORIZED_COLOR: &str = "#9CA3AF";
/// Label of the bucket holding records without a source
pub const UNASSIGNED_SOURCE_NAME: &str = "No source";

/// Smallest and largest amount of a record set (both zero when empty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub min: Money,
    pub max: Money,
}

impl Bounds {
    pub fn of(records: &[ExpenseRecord]) -> Self {
        let mut amounts = records.iter().map(|r| r.amount);
        let Some(first) = amounts.next() else {
            return Self::default();
        };
        amounts.fold(Self { min: first, max: first }, |b, amount| Self {
            min: b.min.min(amount),
            max: b.max.max(amount),
        })
    }
}

/// Subtotal for one category (or the uncategorized bucket)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// `None` for the uncategorized bucket
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub total: Money,
    pub count: usize,
    /// Share of the overall total, in percent
    pub percentage: f64,
}

/// Subtotal for one source (or the no-source bucket)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTotal {
    /// `None` for the no-source bucket
    pub source_id: Option<SourceId>,
    pub name: String,
    pub total: Money,
    pub count: usize,
    pub percentage: f64,
}

/// Derived summary figures of a record set
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Aggregates {
    pub min: Money,
    pub max: Money,
    pub total: Money,
    pub count: usize,
    /// Groups in first-seen order
    pub by_category: Vec<CategoryTotal>,
    /// Groups in first-seen order
    pub by_source: Vec<SourceTotal>,
}

/// Compute every aggregate over `records`
pub fn aggregate(records: &[ExpenseRecord]) -> Aggregates {
    let bounds = Bounds::of(records);
    let total: Money = records.iter().map(|r| r.amount).sum();

    let mut by_category = group_by_category(records);
    for group in &mut by_category {
        group.percentage = group.total.percentage_of(total);
    }

    let mut by_source = group_by_source(records);
    for group in &mut by_source {
        group.percentage = group.total.percentage_of(total);
    }

    Aggregates {
        min: bounds.min,
        max: bounds.max,
        total,
        count: records.len(),
        by_category,
        by_source,
    }
}

fn group_by_category(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<Option<CategoryId>, usize> = HashMap::new();

    for record in records {
        let key = record.category_id();
        let slot = *index.entry(key).or_insert_with(|| {
            let (name, color) = match &record.category {
                Some(category) => (category.name.clone(), category.color.clone()),
                None => (UNCATEGORIZED_NAME.to_string(), UNCATEGORIZED_COLOR.to_string()),
            };
            groups.push(CategoryTotal {
                category_id: key,
                name,
                color,
                total: Money::zero(),
                count: 0,
                percentage: 0.0,
            });
            groups.len() - 1
        });

        groups[slot].total += record.amount;
        groups[slot].count += 1;
    }

    groups
}

fn group_by_source(records: &[ExpenseRecord]) -> Vec<SourceTotal> {
    let mut groups: Vec<SourceTotal> = Vec::new();
    let mut index: HashMap<Option<SourceId>, usize> = HashMap::new();

    for record in records {
        let key = record.source_id();
        let slot = *index.entry(key).or_insert_with(|| {
            let name = match &record.source {
                Some(source) => source.name.clone(),
                None => UNASSIGNED_SOURCE_NAME.to_string(),
            };
            groups.push(SourceTotal {
                source_id: key,
                name,
                total: Money::zero(),
                count: 0,
                percentage: 0.0,
            });
            groups.len() - 1
        });

        groups[slot].total += record.amount;
        groups[slot].count += 1;
    }

    groups
}
