//! CLI command definitions and dispatch.

pub mod booking;
pub mod calendar;
pub mod checklist;
pub mod config;
pub mod expense;
pub mod guest;
pub mod inventory;
pub mod room;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;

use innkeep_core::config::AppConfig;
use innkeep_core::error::AppError;
use innkeep_service::ServiceState;
use innkeep_store::{MemoryStore, Snapshot};

use crate::output::OutputFormat;

/// Innkeep: hotel front-desk management
#[derive(Debug, Parser)]
#[command(name = "innkeep", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and per-environment overrides
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Data snapshot file (overrides data.snapshot_path)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Room catalog
    Room(room::RoomArgs),
    /// Guest registry
    Guest(guest::GuestArgs),
    /// Bookings and stays
    Booking(booking::BookingArgs),
    /// Weekly occupancy calendar
    Calendar(calendar::CalendarArgs),
    /// Room checklists
    Checklist(checklist::ChecklistArgs),
    /// Supply inventory
    Inventory(inventory::InventoryArgs),
    /// Expense ledger
    Expense(expense::ExpenseArgs),
    /// Configuration
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &config, self.format);
        }

        let session = Session::open(config).await?;
        let changed = match &self.command {
            Commands::Room(args) => room::execute(args, &session.state, self.format).await?,
            Commands::Guest(args) => guest::execute(args, &session.state, self.format).await?,
            Commands::Booking(args) => booking::execute(args, &session.state, self.format).await?,
            Commands::Calendar(args) => {
                calendar::execute(args, &session.state, self.format).await?
            }
            Commands::Checklist(args) => {
                checklist::execute(args, &session.state, self.format).await?
            }
            Commands::Inventory(args) => {
                inventory::execute(args, &session.state, self.format).await?
            }
            Commands::Expense(args) => {
                expense::execute(args, &session.state, self.format).await?
            }
            Commands::Config(_) => false,
        };

        if changed {
            session.save().await?;
        }
        Ok(())
    }
}

/// Services over the snapshot file for one command.
pub struct Session {
    pub state: ServiceState,
    path: String,
}

impl Session {
    /// Load the snapshot named by the configuration.
    pub async fn open(config: AppConfig) -> Result<Self, AppError> {
        let path = config.data.snapshot_path.clone();
        let snapshot = Snapshot::load(&path).await?;
        let state = ServiceState::new(config, MemoryStore::from_snapshot(snapshot)?)?;
        Ok(Self { state, path })
    }

    /// Write the store back to the snapshot file.
    pub async fn save(&self) -> Result<(), AppError> {
        self.state.store.snapshot().await.save(&self.path).await?;
        debug!(path = %self.path, "Snapshot written");
        Ok(())
    }
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Find the single item whose id starts with `prefix`.
///
/// Lets users type the short ids shown in tables instead of full UUIDs.
pub fn resolve_prefix<T, I>(
    items: impl IntoIterator<Item = T>,
    id_of: impl Fn(&T) -> I,
    prefix: &str,
    what: &str,
) -> Result<T, AppError>
where
    I: std::fmt::Display,
{
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Err(AppError::validation(format!("{what} id is required")));
    }

    let mut matches: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let id = id_of(item).to_string();
            id.starts_with(&prefix) || id.replace('-', "").starts_with(&prefix)
        })
        .collect();

    match matches.len() {
        0 => Err(AppError::not_found(format!("No {what} matches '{prefix}'"))),
        1 => Ok(matches.remove(0)),
        n => Err(AppError::validation(format!(
            "'{prefix}' matches {n} {what}s; type more of the id"
        ))),
    }
}
