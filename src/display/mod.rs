//! Display formatting for terminal output
//!
//! Plain `String` builders for the expense register, the summary and the
//! category and source lists. Amounts are rendered with the user's number
//! format settings.

pub mod category;
pub mod expense;
pub mod source;

pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_register, format_summary};
pub use source::format_source_list;

use crate::config::{NumberFormat, Settings};
use crate::models::Money;

/// Renders amounts with a currency symbol, grouping and rounding
#[derive(Debug, Clone)]
pub struct MoneyFormatter {
    symbol: String,
    group_separator: char,
    decimal_separator: char,
    decimals: u8,
}

impl Default for MoneyFormatter {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MoneyFormatter {
    pub fn new(symbol: impl Into<String>, format: NumberFormat, decimals: u8) -> Self {
        let (group_separator, decimal_separator) = format.separators();
        Self {
            symbol: symbol.into(),
            group_separator,
            decimal_separator,
            decimals: decimals.min(2),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.currency_symbol.clone(),
            settings.number_format,
            settings.decimal_length,
        )
    }

    /// Format an amount, rounding half away from zero to the configured decimals
    pub fn format(&self, amount: Money) -> String {
        let decimals = u32::from(self.decimals);
        let scale = 10_u64.pow(2 - decimals);
        let rounded = (amount.cents().unsigned_abs() + scale / 2) / scale;

        let unit = 10_u64.pow(decimals);
        let whole = group_digits(rounded / unit, self.group_separator);
        let sign = if amount.is_negative() && rounded != 0 {
            "-"
        } else {
            ""
        };

        if decimals == 0 {
            format!("{}{}{}", sign, self.symbol, whole)
        } else {
            format!(
                "{}{}{}{}{:0width$}",
                sign,
                self.symbol,
                whole,
                self.decimal_separator,
                rounded % unit,
                width = decimals as usize
            )
        }
    }
}

/// Insert `separator` every three digits from the right
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
