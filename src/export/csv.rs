//! CSV export
//!
//! Writes the visible expenses, or the per-category totals, through
//! `csv::Writer` so quoting and escaping are handled by the crate.

use std::io::Write;

use serde::Serialize;

use crate::error::SpendResult;
use crate::models::ExpenseRecord;
use crate::view::CategoryTotal;

/// One exported expense line
#[derive(Debug, Serialize)]
struct ExpenseCsvRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Serialize)]
struct CategoryCsvRow<'a> {
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Color")]
    color: &'a str,
    #[serde(rename = "Count")]
    count: usize,
    #[serde(rename = "Total")]
    total: String,
    #[serde(rename = "Percent")]
    percent: String,
}

/// Plain decimal amount, e.g. `-12.05`, independent of display settings
fn plain_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs())
}

/// Export expense records in the order given
pub fn export_expenses_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> SpendResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    // Header is written by serialize; an empty export still gets one
    if records.is_empty() {
        csv.write_record(["ID", "Date", "Category", "Source", "Description", "Amount"])?;
    }

    for record in records {
        csv.serialize(ExpenseCsvRow {
            id: record.id.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
            category: record.category.as_ref().map(|c| c.name.as_str()).unwrap_or(""),
            source: record.source.as_ref().map(|s| s.name.as_str()).unwrap_or(""),
            description: record.description.as_deref().unwrap_or(""),
            amount: plain_amount(record.amount.cents()),
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Export per-category totals
pub fn export_category_totals_csv<W: Write>(totals: &[CategoryTotal], writer: W) -> SpendResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    if totals.is_empty() {
        csv.write_record(["Category", "Color", "Count", "Total", "Percent"])?;
    }

    for total in totals {
        csv.serialize(CategoryCsvRow {
            category: &total.name,
            color: &total.color,
            count: total.count,
            total: plain_amount(total.total.cents()),
            percent: format!("{:.1}", total.percentage),
        })?;
    }

    csv.flush()?;
    Ok(())
}
