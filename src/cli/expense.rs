//! Expense CLI commands
//!
//! `list`, `summary` and `export` share one set of view arguments: the
//! period, the filter and the sort order. They load the period into an
//! [`ExpenseStore`] and render its view model.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::{
    format_expense_details, format_expense_register, format_summary, MoneyFormatter,
};
use crate::error::{SpendError, SpendResult};
use crate::export::{export_category_totals_csv, export_expenses_csv, export_view_json, ViewExport};
use crate::models::{CategoryId, ExpenseRecord, Money, Period, SourceId};
use crate::services::{CategoryService, ExpenseService, ExpenseUpdate, NewExpense, SourceService};
use crate::storage::Storage;
use crate::view::{ExpenseStore, FilterSpec, SortOrder};

/// Period, filter and sort arguments
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Month to show (YYYY-MM); defaults to the current month
    #[arg(long, conflicts_with = "year")]
    pub month: Option<String>,

    /// Whole year to show (YYYY)
    #[arg(long)]
    pub year: Option<i32>,

    /// Only include this category (name or ID); repeatable
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Only include this source (name or ID); repeatable
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Minimum amount (inclusive)
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount (inclusive)
    #[arg(long)]
    pub max: Option<String>,

    /// Sort order: newest, oldest, amount-asc or amount-desc
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

impl ViewArgs {
    pub fn period(&self) -> SpendResult<Period> {
        if let Some(month) = &self.month {
            return Period::parse(month).map_err(|e| SpendError::Validation(e.to_string()));
        }
        if let Some(year) = self.year {
            return Ok(Period::year(year));
        }
        Ok(Period::current_month())
    }

    /// Resolve names to ids and parse the amount bounds
    pub fn filter(&self, storage: &Storage) -> SpendResult<FilterSpec> {
        let mut spec = FilterSpec::new();

        for category in &self.categories {
            spec = spec.category(resolve_category(storage, category)?);
        }
        for source in &self.sources {
            spec = spec.source(resolve_source(storage, source)?);
        }
        if let Some(min) = &self.min {
            spec = spec.min_amount(parse_amount(min)?);
        }
        if let Some(max) = &self.max {
            spec = spec.max_amount(parse_amount(max)?);
        }

        Ok(spec)
    }

    /// Build a store for these arguments and load it
    fn load_store(&self, storage: &Storage, settings: &Settings) -> SpendResult<ExpenseStore> {
        let service = ExpenseService::new(storage, settings);
        let mut store = ExpenseStore::new(self.period()?, self.sort.unwrap_or(settings.default_sort));
        store.refresh(&service).map_err(|e| match e {
            SpendError::InvalidRecord { id, reason } => SpendError::InvalidRecord {
                id,
                reason: format!(
                    "{}; fix or remove it in {}",
                    reason,
                    storage.paths().expenses_file().display()
                ),
            },
            e => e,
        })?;
        store.set_filter(self.filter(storage)?);
        Ok(store)
    }
}

/// Output format for `expense export`
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g. "12.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Source name or ID
        #[arg(short, long)]
        source: Option<String>,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List expenses for a period
    List(ViewArgs),

    /// Show expense details
    Show {
        /// Expense ID (or a unique prefix of it)
        expense: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (or a unique prefix of it)
        expense: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
        #[arg(short, long, conflicts_with = "clear_source")]
        source: Option<String>,
        #[arg(long)]
        clear_source: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or a unique prefix of it)
        expense: String,
    },

    /// Show totals, bounds and per-category breakdown
    Summary(ViewArgs),

    /// Export the filtered view
    Export {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Export per-category totals instead of expenses (CSV only)
        #[arg(long)]
        totals: bool,
        /// Output file; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SpendResult<()> {
    let service = ExpenseService::new(storage, settings);
    let money = MoneyFormatter::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            source,
            date,
            description,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let mut input = NewExpense::new(parse_amount(&amount)?, date);
            input.description = description;
            if let Some(category) = category {
                input.category_id = Some(resolve_category(storage, &category)?);
            }
            if let Some(source) = source {
                input.source_id = Some(resolve_source(storage, &source)?);
            }

            let record = service.create(input)?;
            println!("Added expense {} ({})", record.id.short(), money.format(record.amount));
        }

        ExpenseCommands::List(args) => {
            let store = args.load_store(storage, settings)?;
            let view = store.view();

            print!("{}", format_expense_register(&view.visible, &money));
            if !view.visible.is_empty() {
                println!(
                    "\n{} of {} expenses, total {}",
                    view.visible.len(),
                    store.records().len(),
                    money.format(view.aggregates.total)
                );
            }
            let hidden = view.hidden_count(store.records());
            if hidden > 0 {
                println!("{} hidden by the current filter", hidden);
            }
        }

        ExpenseCommands::Show { expense } => {
            let record = find_expense(&service, &expense)?;
            print!("{}", format_expense_details(&record, &money));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            description,
            clear_description,
            category,
            clear_category,
            source,
            clear_source,
        } => {
            let record = find_expense(&service, &expense)?;

            let mut update = ExpenseUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                ..Default::default()
            };
            if clear_description {
                update.description = Some(None);
            } else if description.is_some() {
                update.description = Some(description);
            }
            if clear_category {
                update.category_id = Some(None);
            } else if let Some(category) = category {
                update.category_id = Some(Some(resolve_category(storage, &category)?));
            }
            if clear_source {
                update.source_id = Some(None);
            } else if let Some(source) = source {
                update.source_id = Some(Some(resolve_source(storage, &source)?));
            }

            if update.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let updated = service.update(record.id, update)?;
            println!("Updated expense {}", updated.id.short());
        }

        ExpenseCommands::Delete { expense } => {
            let record = find_expense(&service, &expense)?;
            service.delete(record.id)?;
            println!(
                "Deleted expense {} ({} on {})",
                record.id.short(),
                money.format(record.amount),
                record.date.format("%Y-%m-%d")
            );
        }

        ExpenseCommands::Summary(args) => {
            let store = args.load_store(storage, settings)?;
            print!(
                "{}",
                format_summary(store.period(), store.view(), store.records().len(), &money)
            );
        }

        ExpenseCommands::Export {
            view,
            format,
            totals,
            output,
        } => {
            let store = view.load_store(storage, settings)?;
            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };

            match (format, totals) {
                (ExportFormat::Csv, false) => export_expenses_csv(&store.view().visible, &mut writer)?,
                (ExportFormat::Csv, true) => {
                    export_category_totals_csv(&store.view().aggregates.by_category, &mut writer)?
                }
                (ExportFormat::Json, _) => {
                    let export = ViewExport::new(
                        store.period(),
                        store.filter(),
                        store.sort(),
                        store.records().len(),
                        store.view(),
                    );
                    export_view_json(&export, &mut writer)?;
                }
            }
            writer.flush()?;

            if let Some(path) = output {
                eprintln!(
                    "Exported {} expenses to {}",
                    store.view().visible.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}

fn find_expense(service: &ExpenseService<'_>, identifier: &str) -> SpendResult<ExpenseRecord> {
    service
        .find(identifier)?
        .ok_or_else(|| SpendError::expense_not_found(identifier))
}

fn resolve_category(storage: &Storage, identifier: &str) -> SpendResult<CategoryId> {
    CategoryService::new(storage)
        .find(identifier)?
        .map(|c| c.id)
        .ok_or_else(|| SpendError::category_not_found(identifier))
}

fn resolve_source(storage: &Storage, identifier: &str) -> SpendResult<SourceId> {
    SourceService::new(storage)
        .find(identifier)?
        .map(|s| s.id)
        .ok_or_else(|| SpendError::source_not_found(identifier))
}

pub(crate) fn parse_amount(input: &str) -> SpendResult<Money> {
    Money::parse(input).map_err(|e| SpendError::Validation(format!("'{}': {}", input, e)))
}

fn parse_date(input: &str) -> SpendResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        SpendError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::models::Category;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_view_args_period() {
        let args = ViewArgs {
            month: Some("2025-03".into()),
            ..Default::default()
        };
        assert_eq!(args.period().unwrap(), Period::month(2025, 3).unwrap());

        let args = ViewArgs {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(args.period().unwrap(), Period::year(2024));

        let args = ViewArgs {
            month: Some("2025-13".into()),
            ..Default::default()
        };
        assert!(args.period().unwrap_err().is_validation());
    }

    #[test]
    fn test_view_args_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let food = Category::new("Food", "#FF6347");
        storage.categories.upsert(food.clone()).unwrap();

        let args = ViewArgs {
            categories: vec!["food".into()],
            min: Some("5".into()),
            max: Some("20.50".into()),
            ..Default::default()
        };
        let spec = args.filter(&storage).unwrap();
        assert!(spec.category_ids.contains(&food.id));
        assert_eq!(spec.min_amount, Some(Money::from_cents(500)));
        assert_eq!(spec.max_amount, Some(Money::from_cents(2050)));

        let args = ViewArgs {
            categories: vec!["Rent".into()],
            ..Default::default()
        };
        assert!(args.filter(&storage).unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.5").unwrap().cents(), 1250);
        assert!(parse_amount("twelve").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").is_err());
    }
}
