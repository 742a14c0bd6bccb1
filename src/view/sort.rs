//! Sort engine
//!
//! Four fixed orderings. All of them use a stable sort, so records that
//! compare equal keep their input order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ExpenseRecord;

/// How the visible expense list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Latest calendar date first
    #[default]
    NewestFirst,
    /// Earliest calendar date first
    OldestFirst,
    AmountAscending,
    AmountDescending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NewestFirst,
        SortOrder::OldestFirst,
        SortOrder::AmountAscending,
        SortOrder::AmountDescending,
    ];

    /// Short name accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewestFirst => "newest",
            Self::OldestFirst => "oldest",
            Self::AmountAscending => "amount-asc",
            Self::AmountDescending => "amount-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "newest-first" | "date-desc" => Ok(Self::NewestFirst),
            "oldest" | "oldest-first" | "date-asc" => Ok(Self::OldestFirst),
            "amount-asc" | "amount-ascending" => Ok(Self::AmountAscending),
            "amount-desc" | "amount-descending" => Ok(Self::AmountDescending),
            _ => Err(SortParseError(s.to_string())),
        }
    }
}

/// Error type for sort order parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParseError(pub String);

impl fmt::Display for SortParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid sort order '{}'. Use newest, oldest, amount-asc or amount-desc",
            self.0
        )
    }
}

impl std::error::Error for SortParseError {}

/// Return a new vector ordered by `order`; the input is left untouched
pub fn apply_sort(records: &[ExpenseRecord], order: SortOrder) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    match order {
        SortOrder::NewestFirst => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::OldestFirst => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::AmountAscending => sorted.sort_by(|a, b| a.amount.cmp(&b.amount)),
        SortOrder::AmountDescending => sorted.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};
    use chrono::NaiveDate;

    fn record(cents: i64, day: u32) -> ExpenseRecord {
        ExpenseRecord::new(
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    }

    fn ids(records: &[ExpenseRecord]) -> Vec<ExpenseId> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_amount_descending() {
        let records = vec![record(10, 1), record(30, 2), record(20, 3)];
        let amounts: Vec<i64> = apply_sort(&records, SortOrder::AmountDescending)
            .iter()
            .map(|r| r.amount.cents())
            .collect();
        assert_eq!(amounts, vec![30, 20, 10]);
    }

    #[test]
    fn test_equal_amounts_keep_input_order() {
        let first = record(20, 1);
        let second = record(20, 2);
        let records = vec![record(10, 3), first.clone(), second.clone(), record(30, 4)];

        let desc = apply_sort(&records, SortOrder::AmountDescending);
        assert_eq!(ids(&desc[1..3]), vec![first.id, second.id]);

        let asc = apply_sort(&records, SortOrder::AmountAscending);
        assert_eq!(ids(&asc[1..3]), vec![first.id, second.id]);
    }

    #[test]
    fn test_date_orders_are_stable_on_same_day() {
        let a = record(100, 5);
        let b = record(200, 5);
        let records = vec![record(50, 1), a.clone(), b.clone(), record(75, 9)];

        let newest = apply_sort(&records, SortOrder::NewestFirst);
        assert_eq!(newest[0].date.to_string(), "2025-01-09");
        assert_eq!(ids(&newest[1..3]), vec![a.id, b.id]);

        let oldest = apply_sort(&records, SortOrder::OldestFirst);
        assert_eq!(oldest[0].date.to_string(), "2025-01-01");
        assert_eq!(ids(&oldest[1..3]), vec![a.id, b.id]);
    }

    #[test]
    fn test_sort_is_a_permutation() {
        let records = vec![record(30, 3), record(10, 1), record(20, 2), record(10, 2)];
        for order in SortOrder::ALL {
            let sorted = apply_sort(&records, order);
            assert_eq!(sorted.len(), records.len());

            let mut before = ids(&records);
            let mut after = ids(&sorted);
            before.sort();
            after.sort();
            assert_eq!(before, after, "{} dropped or duplicated records", order);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![record(30, 3), record(10, 1)];
        let before = records.clone();
        let _ = apply_sort(&records, SortOrder::AmountAscending);
        assert_eq!(records, before);
    }

    #[test]
    fn test_parse_and_display() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert_eq!("Amount-Desc".parse::<SortOrder>().unwrap(), SortOrder::AmountDescending);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SortOrder::AmountAscending).unwrap();
        assert_eq!(json, "\"amount-ascending\"");
        let back: SortOrder = serde_json::from_str("\"newest-first\"").unwrap();
        assert_eq!(back, SortOrder::NewestFirst);
    }
}
