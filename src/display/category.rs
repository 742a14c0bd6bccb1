//! Category display formatting

use crate::models::Category;

use super::truncate;

/// Format categories as a table, in the order given
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'spendview init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:12} {:24} {:8}\n", "Id", "Name", "Color"));
    output.push_str(&"-".repeat(46));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:12} {} {:8}\n",
            category.id.short(),
            truncate(&category.name, 24),
            category.color
        ));
    }

    output
}
