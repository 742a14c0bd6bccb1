//! Source CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_source_list, MoneyFormatter};
use crate::error::{SpendError, SpendResult};
use crate::models::Source;
use crate::services::SourceService;
use crate::storage::Storage;

use super::expense::parse_amount;

/// Source subcommands
#[derive(Subcommand)]
pub enum SourceCommands {
    /// List all sources, oldest first
    List,

    /// Create a new funding source
    Add {
        /// Source name
        name: String,
        /// Opening balance
        #[arg(short, long, default_value = "0")]
        balance: String,
    },

    /// Edit a source
    Edit {
        /// Source name or ID
        source: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        balance: Option<String>,
    },

    /// Delete a source; its expenses keep no source
    Delete {
        /// Source name or ID
        source: String,
    },
}

/// Handle a source command
pub fn handle_source_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SourceCommands,
) -> SpendResult<()> {
    let service = SourceService::new(storage);
    let money = MoneyFormatter::from_settings(settings);

    match cmd {
        SourceCommands::List => {
            print!("{}", format_source_list(&service.list()?, &money));
        }

        SourceCommands::Add { name, balance } => {
            let source = service.create(&name, parse_amount(&balance)?)?;
            println!(
                "Created source: {} ({}) with balance {}",
                source.name,
                source.id.short(),
                money.format(source.balance)
            );
        }

        SourceCommands::Edit {
            source,
            name,
            balance,
        } => {
            let found = find_source(&service, &source)?;
            let balance = balance.as_deref().map(parse_amount).transpose()?;
            if name.is_none() && balance.is_none() {
                println!("Nothing to change.");
                return Ok(());
            }
            let updated = service.update(found.id, name.as_deref(), balance)?;
            println!("Updated source: {}", updated.name);
        }

        SourceCommands::Delete { source } => {
            let found = find_source(&service, &source)?;
            let (deleted, detached) = service.delete(found.id)?;
            println!("Deleted source: {}", deleted.name);
            if detached > 0 {
                println!("{} expense(s) no longer have a source.", detached);
            }
        }
    }

    Ok(())
}

fn find_source(service: &SourceService<'_>, identifier: &str) -> SpendResult<Source> {
    service
        .find(identifier)?
        .ok_or_else(|| SpendError::source_not_found(identifier))
}
