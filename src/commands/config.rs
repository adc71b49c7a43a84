//! Configuration inspection commands.

use clap::{Args, Subcommand};

use innkeep_core::config::AppConfig;
use innkeep_core::error::AppError;
use innkeep_engine::CalendarOptions;
use innkeep_service::ChecklistTemplate;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Check that the configuration is usable
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            match format {
                OutputFormat::Json => output::print_json(config),
                OutputFormat::Table => {
                    output::print_kv("logging.level", &config.logging.level);
                    output::print_kv("logging.format", &config.logging.format);
                    output::print_kv(
                        "calendar.show_empty_rooms",
                        &config.calendar.show_empty_rooms.to_string(),
                    );
                    output::print_kv(
                        "calendar.include_cancelled",
                        &config.calendar.include_cancelled.to_string(),
                    );
                    output::print_kv("calendar.week_starts_on", &config.calendar.week_starts_on);
                    output::print_kv(
                        "checklist.template",
                        &format!("{} items", config.checklist.template.len()),
                    );
                    output::print_kv(
                        "inventory.low_stock_inclusive",
                        &config.inventory.low_stock_inclusive.to_string(),
                    );
                    output::print_kv("data.snapshot_path", &config.data.snapshot_path);
                }
            }
            Ok(())
        }
        ConfigCommand::Validate => {
            CalendarOptions::try_from(&config.calendar)?;
            let template = ChecklistTemplate::try_from(&config.checklist)?;
            if template.is_empty() {
                output::print_warning("Checklist template is empty; check-ins get no checklist");
            }
            output::print_success("Configuration is valid");
            Ok(())
        }
    }
}
