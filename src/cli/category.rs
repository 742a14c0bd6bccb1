//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::{SpendError, SpendResult};
use crate::models::Category;
use crate::services::CategoryService;
use crate::storage::Storage;
use crate::view::aggregate::UNCATEGORIZED_COLOR;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories, newest first
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Display color (#RGB or #RRGGBB)
        #[arg(short, long, default_value = UNCATEGORIZED_COLOR)]
        color: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category; its expenses become uncategorized
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Recreate any missing default categories
    Defaults,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SpendResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Add { name, color } => {
            let category = service.create(&name, &color)?;
            println!("Created category: {} ({})", category.name, category.id.short());
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            let found = find_category(&service, &category)?;
            if name.is_none() && color.is_none() {
                println!("Nothing to change.");
                return Ok(());
            }
            let updated = service.update(found.id, name.as_deref(), color.as_deref())?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = find_category(&service, &category)?;
            let (deleted, detached) = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.name);
            if detached > 0 {
                println!("{} expense(s) are now uncategorized.", detached);
            }
        }

        CategoryCommands::Defaults => {
            let created = service.seed_defaults()?;
            if created.is_empty() {
                println!("All default categories already exist.");
            } else {
                let names: Vec<&str> = created.iter().map(|c| c.name.as_str()).collect();
                println!("Created: {}", names.join(", "));
            }
        }
    }

    Ok(())
}

fn find_category(service: &CategoryService<'_>, identifier: &str) -> SpendResult<Category> {
    service
        .find(identifier)?
        .ok_or_else(|| SpendError::category_not_found(identifier))
}
