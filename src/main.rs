use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use spendview::cli::{
    handle_category_command, handle_expense_command, handle_source_command, CategoryCommands,
    ExpenseCommands, SourceCommands,
};
use spendview::config::{NumberFormat, Settings, SpendPaths};
use spendview::models::DEFAULT_CATEGORIES;
use spendview::storage::{initialize_storage, Storage};
use spendview::view::SortOrder;

#[derive(Parser)]
#[command(
    name = "spendview",
    version,
    about = "Track expenses and explore them by category, source and amount",
    long_about = "spendview records expenses against categories and funding sources, \
                  then shows any month or year filtered, sorted and summarized."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management and views
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Funding source management commands
    #[command(subcommand)]
    Source(SourceCommands),

    /// Initialize the data directory with default categories
    Init,

    /// Show or change configuration
    Config {
        /// Currency symbol shown before amounts
        #[arg(long)]
        currency: Option<String>,
        /// Thousands/decimal separator style
        #[arg(long, value_enum)]
        number_format: Option<NumberFormat>,
        /// Decimals shown (0-2)
        #[arg(long)]
        decimals: Option<u8>,
        /// Require a source on every new expense (true/false)
        #[arg(long, action = ArgAction::Set)]
        track_sources: Option<bool>,
        /// Sort order used when none is given
        #[arg(long)]
        default_sort: Option<SortOrder>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    spendview::logging::init(cli.verbose);

    let paths = SpendPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Source(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_source_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing spendview at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded {
                println!();
                println!("Default categories have been created:");
                for (name, color) in DEFAULT_CATEGORIES {
                    println!("  - {} ({})", name, color);
                }
            }
            println!();
            println!("Run 'spendview source add <name>' to add a funding source.");
        }
        Some(Commands::Config {
            currency,
            number_format,
            decimals,
            track_sources,
            default_sort,
        }) => {
            let changed = currency.is_some()
                || number_format.is_some()
                || decimals.is_some()
                || track_sources.is_some()
                || default_sort.is_some();

            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(number_format) = number_format {
                settings.number_format = number_format;
            }
            if let Some(decimals) = decimals {
                settings.decimal_length = decimals;
            }
            if let Some(track_sources) = track_sources {
                settings.track_sources = track_sources;
            }
            if let Some(default_sort) = default_sort {
                settings.default_sort = default_sort;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("spendview Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Config file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency:      {}", settings.currency_symbol);
            println!("  Number format: {:?}", settings.number_format);
            println!("  Decimals:      {}", settings.decimal_length);
            println!("  Track sources: {}", settings.track_sources);
            println!("  Default sort:  {}", settings.default_sort);
        }
        None => {
            println!("spendview - personal expense tracking");
            println!();
            println!("Run 'spendview --help' for usage information.");
            println!("Run 'spendview init' to get started.");
        }
    }

    Ok(())
}
