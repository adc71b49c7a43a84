//! Supply inventory commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_entity::inventory::{InventoryItem, NewInventoryItem};
use innkeep_service::ServiceState;

use crate::output::{self, OutputFormat};

/// Arguments for inventory commands
#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Inventory subcommand
    #[command(subcommand)]
    pub command: InventoryCommand,
}

/// Inventory subcommands
#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// List items
    List {
        /// Only items in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Items at or below their minimum level
    Low,
    /// Add an item
    Add {
        /// Item name
        #[arg(short, long)]
        name: String,
        /// Category, e.g. linen or toiletries
        #[arg(short, long)]
        category: String,
        /// Total quantity when fully stocked
        #[arg(short, long)]
        quantity: u32,
        /// Units on hand (defaults to the full quantity)
        #[arg(short, long)]
        level: Option<u32>,
        /// Restock threshold
        #[arg(short, long, default_value_t = 0)]
        minimum: u32,
        /// Unit label
        #[arg(short, long, default_value = "pcs")]
        unit: String,
    },
    /// Set the units on hand
    Set {
        /// Item id or id prefix
        id: String,
        /// New level
        level: u32,
    },
    /// Add or remove units (e.g. 5 or -3)
    Adjust {
        /// Item id or id prefix
        id: String,
        /// Change in units
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Fill an item back up to its full quantity
    Restock {
        /// Item id or id prefix
        id: String,
    },
    /// Remove an item
    Delete {
        /// Item id or id prefix
        id: String,
    },
}

/// Inventory display row
#[derive(Debug, Serialize, Tabled)]
struct InventoryRow {
    /// Short ID
    id: String,
    /// Name
    name: String,
    /// Category
    category: String,
    /// Level / quantity
    stock: String,
    /// Minimum
    minimum: u32,
    /// Last restocked
    restocked: String,
    /// Low stock marker
    low: String,
}

impl InventoryRow {
    fn new(item: &InventoryItem, low_stock_inclusive: bool) -> Self {
        Self {
            id: item.id.short(),
            name: item.name.clone(),
            category: item.category.clone(),
            stock: format!("{}/{} {}", item.current_level, item.quantity, item.unit),
            minimum: item.minimum_level,
            restocked: item.last_restocked.format("%Y-%m-%d").to_string(),
            low: if item.is_low_stock(low_stock_inclusive) { "⚠" } else { "" }.to_string(),
        }
    }
}

fn print_items(state: &ServiceState, items: &[InventoryItem], format: OutputFormat) {
    let inclusive = state.config.inventory.low_stock_inclusive;
    match format {
        OutputFormat::Json => output::print_json(items),
        OutputFormat::Table => {
            let rows: Vec<InventoryRow> =
                items.iter().map(|i| InventoryRow::new(i, inclusive)).collect();
            output::print_list(&rows, format);
        }
    }
}

async fn resolve_item(state: &ServiceState, id: &str) -> Result<InventoryItem, AppError> {
    let items = state.inventory.list(None).await?;
    super::resolve_prefix(items, |i| i.id, id, "inventory item")
}

fn report_level(item: &InventoryItem) {
    output::print_success(&format!(
        "{}: {}/{} {}",
        item.name, item.current_level, item.quantity, item.unit
    ));
}

/// Execute inventory commands
pub async fn execute(
    args: &InventoryArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        InventoryCommand::List { category } => {
            let items = state.inventory.list(category.as_deref()).await?;
            print_items(state, &items, format);
            Ok(false)
        }
        InventoryCommand::Low => {
            let items = state.inventory.low_stock().await?;
            print_items(state, &items, format);
            Ok(false)
        }
        InventoryCommand::Add {
            name,
            category,
            quantity,
            level,
            minimum,
            unit,
        } => {
            let item = state
                .inventory
                .create(NewInventoryItem {
                    name: name.clone(),
                    category: category.clone(),
                    quantity: *quantity,
                    current_level: level.unwrap_or(*quantity),
                    minimum_level: *minimum,
                    unit: unit.clone(),
                    notes: None,
                })
                .await?;
            report_level(&item);
            Ok(true)
        }
        InventoryCommand::Set { id, level } => {
            let item = resolve_item(state, id).await?;
            report_level(&state.inventory.set_level(item.id, *level).await?);
            Ok(true)
        }
        InventoryCommand::Adjust { id, delta } => {
            let item = resolve_item(state, id).await?;
            report_level(&state.inventory.adjust(item.id, *delta).await?);
            Ok(true)
        }
        InventoryCommand::Restock { id } => {
            let item = resolve_item(state, id).await?;
            report_level(&state.inventory.restock(item.id).await?);
            Ok(true)
        }
        InventoryCommand::Delete { id } => {
            let item = resolve_item(state, id).await?;
            state.inventory.delete(item.id).await?;
            output::print_warning(&format!("{} removed", item.name));
            Ok(true)
        }
    }
}
