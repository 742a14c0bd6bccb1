//! Source display formatting

use crate::models::{Money, Source};

use super::{truncate, MoneyFormatter};

/// Format sources as a table with a total balance line
pub fn format_source_list(sources: &[Source], money: &MoneyFormatter) -> String {
    if sources.is_empty() {
        return "No sources found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:12} {:24} {:>14}\n", "Id", "Name", "Balance"));
    output.push_str(&"-".repeat(52));
    output.push('\n');

    for source in sources {
        output.push_str(&format!(
            "{:12} {} {:>14}\n",
            source.id.short(),
            truncate(&source.name, 24),
            money.format(source.balance)
        ));
    }

    let total: Money = sources.iter().map(|s| s.balance).sum();
    output.push_str(&"-".repeat(52));
    output.push('\n');
    output.push_str(&format!("{:>37} {:>14}\n", "Total:", money.format(total)));

    output
}
