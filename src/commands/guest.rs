//! Guest registry commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_entity::guest::{Guest, NewGuest};
use innkeep_service::ServiceState;

use crate::output::{self, OutputFormat};

/// Arguments for guest commands
#[derive(Debug, Args)]
pub struct GuestArgs {
    /// Guest subcommand
    #[command(subcommand)]
    pub command: GuestCommand,
}

/// Guest subcommands
#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// List all guests
    List,
    /// Search guests by name
    Search {
        /// Part of a first, middle or last name
        query: String,
    },
    /// Register a guest
    Add {
        /// First name
        #[arg(long)]
        first_name: String,
        /// Last name
        #[arg(long)]
        last_name: String,
        /// Middle name
        #[arg(long)]
        middle_name: Option<String>,
        /// Passport or ID card number
        #[arg(long)]
        id_no: String,
        /// Mobile phone
        #[arg(long)]
        mobile: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Country
        #[arg(long)]
        country: Option<String>,
        /// Company
        #[arg(long)]
        company: Option<String>,
    },
    /// Change a guest's details
    Update {
        /// Guest id or id prefix
        id: String,
        /// New values
        #[command(flatten)]
        changes: GuestChanges,
    },
    /// Remove a guest with no active booking
    Delete {
        /// Guest id or id prefix
        id: String,
    },
}

/// Fields a guest update may change; omitted ones keep their value
#[derive(Debug, Args)]
pub struct GuestChanges {
    /// First name
    #[arg(long)]
    first_name: Option<String>,
    /// Last name
    #[arg(long)]
    last_name: Option<String>,
    /// Middle name
    #[arg(long)]
    middle_name: Option<String>,
    /// Passport or ID card number
    #[arg(long)]
    id_no: Option<String>,
    /// Mobile phone
    #[arg(long)]
    mobile: Option<String>,
    /// Email address
    #[arg(long)]
    email: Option<String>,
    /// Country
    #[arg(long)]
    country: Option<String>,
    /// Company
    #[arg(long)]
    company: Option<String>,
}

impl GuestChanges {
    /// The full form for `guest` with these changes applied.
    fn apply(&self, guest: Guest) -> NewGuest {
        let pick = |change: &Option<String>, current: Option<String>| change.clone().or(current);
        NewGuest {
            first_name: self.first_name.clone().unwrap_or(guest.first_name),
            last_name: self.last_name.clone().unwrap_or(guest.last_name),
            middle_name: pick(&self.middle_name, guest.middle_name),
            identification_no: self.id_no.clone().unwrap_or(guest.identification_no),
            birth_date: guest.birth_date,
            country: pick(&self.country, guest.country),
            home_address: guest.home_address,
            mobile_no: pick(&self.mobile, guest.mobile_no),
            email_address: pick(&self.email, guest.email_address),
            company_name: pick(&self.company, guest.company_name),
            emergency_contact_name: guest.emergency_contact_name,
            emergency_contact_number: guest.emergency_contact_number,
        }
    }
}

/// Guest display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct GuestRow {
    /// Short ID
    id: String,
    /// Last, First
    name: String,
    /// Identification number
    identification: String,
    /// Mobile
    mobile: String,
    /// Email
    email: String,
}

impl From<&Guest> for GuestRow {
    fn from(guest: &Guest) -> Self {
        Self {
            id: guest.id.short(),
            name: guest.display_name(),
            identification: guest.identification_no.clone(),
            mobile: guest.mobile_no.clone().unwrap_or_default(),
            email: guest.email_address.clone().unwrap_or_default(),
        }
    }
}

async fn resolve_guest(state: &ServiceState, id: &str) -> Result<Guest, AppError> {
    let guests = state.guests.list().await?;
    super::resolve_prefix(guests, |g| g.id, id, "guest")
}

/// Execute guest commands
pub async fn execute(
    args: &GuestArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        GuestCommand::List => {
            let guests = state.guests.list().await?;
            let rows: Vec<GuestRow> = guests.iter().map(GuestRow::from).collect();
            output::print_list(&rows, format);
            Ok(false)
        }
        GuestCommand::Search { query } => {
            let guests = state.guests.search(query).await?;
            let rows: Vec<GuestRow> = guests.iter().map(GuestRow::from).collect();
            output::print_list(&rows, format);
            Ok(false)
        }
        GuestCommand::Add {
            first_name,
            last_name,
            middle_name,
            id_no,
            mobile,
            email,
            country,
            company,
        } => {
            let guest = state
                .guests
                .register(NewGuest {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    middle_name: middle_name.clone(),
                    identification_no: id_no.clone(),
                    mobile_no: mobile.clone(),
                    email_address: email.clone(),
                    country: country.clone(),
                    company_name: company.clone(),
                    ..Default::default()
                })
                .await?;
            output::print_success(&format!("Guest {} registered", guest.display_name()));
            output::print_item(&GuestRow::from(&guest), format);
            Ok(true)
        }
        GuestCommand::Update { id, changes } => {
            let guest = resolve_guest(state, id).await?;
            let guest = state.guests.update(guest.id, changes.apply(guest)).await?;
            output::print_success(&format!("Guest {} updated", guest.display_name()));
            output::print_item(&GuestRow::from(&guest), format);
            Ok(true)
        }
        GuestCommand::Delete { id } => {
            let guest = resolve_guest(state, id).await?;
            state.guests.delete(guest.id).await?;
            output::print_warning(&format!("Guest {} removed", guest.display_name()));
            Ok(true)
        }
    }
}
