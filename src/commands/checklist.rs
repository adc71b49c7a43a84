//! Checklist commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_entity::checklist::{ChecklistItem, ChecklistProgress};
use innkeep_service::ServiceState;

use crate::output::{self, OutputFormat};

/// Arguments for checklist commands
#[derive(Debug, Args)]
pub struct ChecklistArgs {
    /// Checklist subcommand
    #[command(subcommand)]
    pub command: ChecklistCommand,
}

/// Checklist subcommands
#[derive(Debug, Subcommand)]
pub enum ChecklistCommand {
    /// Show a booking's checklist, grouped by category
    Show {
        /// Booking id or id prefix
        booking: String,
    },
    /// Tick or untick an item
    Toggle {
        /// Booking id or id prefix
        booking: String,
        /// Item id or id prefix
        item: String,
    },
    /// Replace the checklist with a fresh copy of the template
    Reset {
        /// Booking id or id prefix
        booking: String,
    },
}

/// Checklist display row
#[derive(Debug, Serialize, Tabled)]
struct ChecklistRow {
    /// Short ID
    id: String,
    /// Category
    category: String,
    /// Item text
    item: String,
    /// Done
    done: String,
}

impl From<&ChecklistItem> for ChecklistRow {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            id: item.id.short(),
            category: item.category.to_string(),
            item: item.item.clone(),
            done: if item.completed { "✓" } else { "" }.to_string(),
        }
    }
}

fn print_progress(progress: &ChecklistProgress) {
    output::print_kv(
        "Progress",
        &format!(
            "{}/{} ({}%)",
            progress.completed,
            progress.total,
            progress.percent()
        ),
    );
}

/// Execute checklist commands
pub async fn execute(
    args: &ChecklistArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        ChecklistCommand::Show { booking } => {
            let booking = super::booking::resolve_booking(state, booking).await?;
            let groups = state.checklists.grouped(booking.id).await?;
            let progress = state.checklists.progress(booking.id).await?;

            match format {
                OutputFormat::Json => output::print_json(&groups),
                OutputFormat::Table => {
                    let rows: Vec<ChecklistRow> = groups
                        .values()
                        .flatten()
                        .map(ChecklistRow::from)
                        .collect();
                    output::print_list(&rows, format);
                    print_progress(&progress);
                }
            }
            Ok(false)
        }
        ChecklistCommand::Toggle { booking, item } => {
            let booking = super::booking::resolve_booking(state, booking).await?;
            let items = state.checklists.get(booking.id).await?;
            let item = super::resolve_prefix(items, |i| i.id, item, "checklist item")?;

            let item = state.checklists.toggle(item.id).await?;
            let verb = if item.completed { "done" } else { "not done" };
            output::print_success(&format!("'{}' marked {verb}", item.item));
            print_progress(&state.checklists.progress(booking.id).await?);
            Ok(true)
        }
        ChecklistCommand::Reset { booking } => {
            let booking = super::booking::resolve_booking(state, booking).await?;
            let items = state.checklists.reset(booking.id).await?;
            output::print_success(&format!("Checklist reset with {} items", items.len()));
            Ok(true)
        }
    }
}
