//! Expense display formatting
//!
//! Register view of the visible expenses, a detail view for one expense and
//! the summary block built from the view model.

use crate::models::{ExpenseRecord, Period};
use crate::view::aggregate::{UNASSIGNED_SOURCE_NAME, UNCATEGORIZED_NAME};
use crate::view::ViewModel;

use super::{truncate, MoneyFormatter};

/// Format one register row
pub fn format_expense_row(record: &ExpenseRecord, money: &MoneyFormatter) -> String {
    let category = record
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let source = record
        .source
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("-");

    format!(
        "{:12} {} {} {} {} {:>14}",
        record.id.short(),
        record.date.format("%Y-%m-%d"),
        truncate(category, 14),
        truncate(source, 12),
        truncate(record.description.as_deref().unwrap_or(""), 24),
        money.format(record.amount)
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(records: &[ExpenseRecord], money: &MoneyFormatter) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:14} {:12} {:24} {:>14}\n",
        "Id", "Date", "Category", "Source", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(93));
    output.push('\n');

    for record in records {
        output.push_str(&format_expense_row(record, money));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(record: &ExpenseRecord, money: &MoneyFormatter) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", record.id));
    output.push_str(&format!("Date:        {}\n", record.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", money.format(record.amount)));

    match &record.category {
        Some(category) => {
            output.push_str(&format!("Category:    {} ({})\n", category.name, category.color))
        }
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    match &record.source {
        Some(source) => output.push_str(&format!(
            "Source:      {} (balance {})\n",
            source.name,
            money.format(source.balance)
        )),
        None => output.push_str("Source:      (none)\n"),
    }

    if let Some(description) = &record.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        record.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format the summary block for one composed view
///
/// `total_count` is the size of the unfiltered snapshot.
pub fn format_summary(
    period: Period,
    view: &ViewModel,
    total_count: usize,
    money: &MoneyFormatter,
) -> String {
    let agg = &view.aggregates;
    let mut output = String::new();

    output.push_str(&format!("Expenses for {}\n", period));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "Showing:     {} of {}\n",
        view.visible.len(),
        total_count
    ));
    output.push_str(&format!("Total:       {}\n", money.format(agg.total)));
    output.push_str(&format!("Smallest:    {}\n", money.format(agg.min)));
    output.push_str(&format!("Largest:     {}\n", money.format(agg.max)));
    output.push_str(&format!(
        "Range:       {} - {}\n",
        money.format(view.bounds.min),
        money.format(view.bounds.max)
    ));

    output.push_str("\nBy category:\n");
    if agg.by_category.is_empty() {
        output.push_str("  There is no data\n");
    }
    for group in &agg.by_category {
        let name = if group.category_id.is_none() {
            UNCATEGORIZED_NAME
        } else {
            group.name.as_str()
        };
        output.push_str(&format!(
            "  {} {:>5} {:>14} {:>6.1}%\n",
            truncate(name, 20),
            group.count,
            money.format(group.total),
            group.percentage
        ));
    }

    if agg.by_source.iter().any(|g| g.source_id.is_some()) {
        output.push_str("\nBy source:\n");
        for group in &agg.by_source {
            let name = if group.source_id.is_none() {
                UNASSIGNED_SOURCE_NAME
            } else {
                group.name.as_str()
            };
            output.push_str(&format!(
                "  {} {:>5} {:>14} {:>6.1}%\n",
                truncate(name, 20),
                group.count,
                money.format(group.total),
                group.percentage
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, Source};
    use crate::view::{compose, FilterSpec, SortOrder};
    use chrono::NaiveDate;

    fn records() -> (Category, Vec<ExpenseRecord>) {
        let food = Category::new("Food", "#FF6347");
        let card = Source::new("Card", Money::from_units(200));
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let records = vec![
            ExpenseRecord::new(Money::from_cents(1250), day(2))
                .with_category(&food)
                .with_source(&card)
                .with_description("Lunch"),
            ExpenseRecord::new(Money::from_cents(4000), day(5)),
        ];
        (food, records)
    }

    #[test]
    fn test_register() {
        let (_, records) = records();
        let output = format_expense_register(&records, &MoneyFormatter::default());
        assert!(output.contains("Description"));
        assert!(output.contains("Lunch"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("2025-01-05"));
    }

    #[test]
    fn test_empty_register() {
        let output = format_expense_register(&[], &MoneyFormatter::default());
        assert_eq!(output, "No expenses found.\n");
    }

    #[test]
    fn test_details() {
        let (_, records) = records();
        let output = format_expense_details(&records[0], &MoneyFormatter::default());
        assert!(output.contains("Category:    Food (#FF6347)"));
        assert!(output.contains("balance $200.00"));

        let output = format_expense_details(&records[1], &MoneyFormatter::default());
        assert!(output.contains("(uncategorized)"));
    }

    #[test]
    fn test_summary() {
        let (food, records) = records();
        let period = Period::month(2025, 1).unwrap();
        let view = compose(&records, &FilterSpec::new(), SortOrder::NewestFirst);
        let output = format_summary(period, &view, records.len(), &MoneyFormatter::default());

        assert!(output.contains("Showing:     2 of 2"));
        assert!(output.contains("Total:       $52.50"));
        assert!(output.contains("Food"));
        assert!(output.contains(UNCATEGORIZED_NAME));
        assert!(output.contains("By source:"));

        let filtered = compose(&records, &FilterSpec::new().category(food.id), SortOrder::NewestFirst);
        let output = format_summary(period, &filtered, records.len(), &MoneyFormatter::default());
        assert!(output.contains("Showing:     1 of 2"));
        assert!(output.contains("Range:       $12.50 - $40.00"));
    }
}
