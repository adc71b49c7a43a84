//! Booking commands.

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_core::types::{GuestId, RoomId};
use innkeep_engine::StayRequest;
use innkeep_entity::booking::{
    Booking, BookingFilter, BookingStatus, CreateBookingRequest, PaymentStatus,
};
use innkeep_entity::guest::Guest;
use innkeep_service::ServiceState;

use crate::output::{self, OutputFormat};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// List bookings
    List {
        /// Only bookings with this status
        #[arg(long)]
        status: Option<BookingStatus>,
        /// Only bookings for this room number
        #[arg(long)]
        room: Option<String>,
        /// Only bookings for this guest (id or id prefix)
        #[arg(long)]
        guest: Option<String>,
    },
    /// Show one booking
    Show {
        /// Booking id or id prefix
        id: String,
    },
    /// Check whether a room is free, without booking it
    Check {
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Book a room
    Create {
        #[command(flatten)]
        stay: StayArgs,
        /// Guest id or id prefix
        #[arg(short, long)]
        guest: String,
        /// Payment status (pending, paid, partially_paid, refunded)
        #[arg(long)]
        payment: Option<PaymentStatus>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Check a guest in
    CheckIn {
        /// Booking id or id prefix
        id: String,
    },
    /// Check a guest out
    CheckOut {
        /// Booking id or id prefix
        id: String,
    },
    /// Cancel a confirmed booking
    Cancel {
        /// Booking id or id prefix
        id: String,
    },
    /// Extend a stay
    Extend {
        /// Booking id or id prefix
        id: String,
        /// Extra nights
        #[arg(long, conflicts_with = "until", required_unless_present = "until")]
        days: Option<u32>,
        /// New check-out date
        #[arg(long)]
        until: Option<NaiveDate>,
    },
    /// Confirmed bookings arriving today
    Arrivals {
        /// Day to look at instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Checked-in bookings leaving today
    Departures {
        /// Day to look at instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a booking
    Delete {
        /// Booking id or id prefix
        id: String,
    },
}

/// Room, dates and party for a stay
#[derive(Debug, Args)]
pub struct StayArgs {
    /// Room number
    #[arg(short, long)]
    pub room: String,
    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: NaiveDate,
    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: NaiveDate,
    /// Adults
    #[arg(long, default_value_t = 1)]
    pub adults: u32,
    /// Children
    #[arg(long, default_value_t = 0)]
    pub children: u32,
}

/// Booking display row
#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    /// Short ID
    id: String,
    /// Room number
    room: String,
    /// Guest name
    guest: String,
    /// Check-in
    check_in: NaiveDate,
    /// Check-out
    check_out: NaiveDate,
    /// Nights
    nights: i64,
    /// Guests (adults + children)
    party: String,
    /// Total
    total: String,
    /// Status
    status: BookingStatus,
    /// Payment
    payment: PaymentStatus,
}

/// Room numbers and guest names for display.
struct Labels {
    rooms: HashMap<RoomId, String>,
    guests: HashMap<GuestId, String>,
}

impl Labels {
    async fn load(state: &ServiceState) -> Result<Self, AppError> {
        let rooms = state
            .rooms
            .list(Default::default())
            .await?
            .into_iter()
            .map(|r| (r.id, r.number))
            .collect();
        let guests = state
            .guests
            .list()
            .await?
            .into_iter()
            .map(|g| (g.id, g.display_name()))
            .collect();
        Ok(Self { rooms, guests })
    }

    fn row(&self, booking: &Booking) -> BookingRow {
        BookingRow {
            id: booking.id.short(),
            room: self
                .rooms
                .get(&booking.room_id)
                .cloned()
                .unwrap_or_else(|| booking.room_id.short()),
            guest: self
                .guests
                .get(&booking.guest_id)
                .cloned()
                .unwrap_or_else(|| booking.guest_id.short()),
            check_in: booking.check_in(),
            check_out: booking.check_out(),
            nights: booking.stay.nights(),
            party: format!(
                "{} ({}+{})",
                booking.party_size(),
                booking.adults,
                booking.children
            ),
            total: output::format_amount(booking.total_amount),
            status: booking.status,
            payment: booking.payment_status,
        }
    }
}

async fn print_bookings(
    state: &ServiceState,
    bookings: &[Booking],
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => output::print_json(bookings),
        OutputFormat::Table => {
            let labels = Labels::load(state).await?;
            let rows: Vec<BookingRow> = bookings.iter().map(|b| labels.row(b)).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

async fn print_booking(
    state: &ServiceState,
    booking: &Booking,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => output::print_json(booking),
        OutputFormat::Table => {
            let labels = Labels::load(state).await?;
            output::print_item(&labels.row(booking), format);
        }
    }
    Ok(())
}

/// Resolve a booking from a full id or an id prefix.
pub(crate) async fn resolve_booking(state: &ServiceState, id: &str) -> Result<Booking, AppError> {
    let bookings = state.bookings.list_bookings(&BookingFilter::all()).await?;
    super::resolve_prefix(bookings, |b| b.id, id, "booking")
}

async fn resolve_guest(state: &ServiceState, id: &str) -> Result<Guest, AppError> {
    let guests = state.guests.list().await?;
    super::resolve_prefix(guests, |g| g.id, id, "guest")
}

async fn stay_request(state: &ServiceState, stay: &StayArgs) -> Result<StayRequest, AppError> {
    let room = state.rooms.find_by_number(&stay.room).await?;
    Ok(StayRequest {
        room_id: room.id,
        check_in: stay.check_in,
        check_out: stay.check_out,
        adults: stay.adults,
        children: stay.children,
    })
}

/// Execute booking commands
pub async fn execute(
    args: &BookingArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        BookingCommand::List {
            status,
            room,
            guest,
        } => {
            let mut filter = BookingFilter::all();
            if let Some(status) = status {
                filter = filter.with_status(*status);
            }
            if let Some(number) = room {
                filter.room_id = Some(state.rooms.find_by_number(number).await?.id);
            }
            if let Some(guest) = guest {
                filter.guest_id = Some(resolve_guest(state, guest).await?.id);
            }

            let bookings = state.bookings.list_bookings(&filter).await?;
            print_bookings(state, &bookings, format).await?;
            Ok(false)
        }
        BookingCommand::Show { id } => {
            let booking = resolve_booking(state, id).await?;
            print_booking(state, &booking, format).await?;
            if format == OutputFormat::Table {
                if let Some(notes) = &booking.notes {
                    output::print_kv("Notes", notes);
                }
                output::print_kv("Booking ID", &booking.id.to_string());
            }
            Ok(false)
        }
        BookingCommand::Check { stay } => {
            let request = stay_request(state, stay).await?;
            let quote = state.bookings.check_availability(&request).await?;
            match format {
                OutputFormat::Json => output::print_json(&quote),
                OutputFormat::Table => {
                    output::print_success(&format!("Room {} is available", stay.room));
                    output::print_kv("Stay", &quote.stay.to_string());
                    output::print_kv("Nights", &quote.nights.to_string());
                    output::print_kv("Rate", &output::format_amount(quote.price_per_night));
                    output::print_kv("Total", &output::format_amount(quote.total_amount));
                }
            }
            Ok(false)
        }
        BookingCommand::Create {
            stay,
            guest,
            payment,
            notes,
        } => {
            let request = stay_request(state, stay).await?;
            let guest = resolve_guest(state, guest).await?;
            let booking = state
                .bookings
                .create_booking(CreateBookingRequest {
                    room_id: request.room_id,
                    guest_id: guest.id,
                    check_in_date: request.check_in,
                    check_out_date: request.check_out,
                    adults: request.adults,
                    children: request.children,
                    payment_status: *payment,
                    notes: notes.clone(),
                })
                .await?;
            output::print_success(&format!(
                "Booked room {} for {}",
                stay.room,
                guest.display_name()
            ));
            print_booking(state, &booking, format).await?;
            Ok(true)
        }
        BookingCommand::CheckIn { id } => {
            let booking = resolve_booking(state, id).await?;
            let booking = state.bookings.check_in(booking.id).await?;
            output::print_success(&format!("Booking {} checked in", booking.id.short()));
            Ok(true)
        }
        BookingCommand::CheckOut { id } => {
            let booking = resolve_booking(state, id).await?;
            let booking = state.bookings.check_out(booking.id).await?;
            output::print_success(&format!("Booking {} checked out", booking.id.short()));
            Ok(true)
        }
        BookingCommand::Cancel { id } => {
            let booking = resolve_booking(state, id).await?;
            let booking = state.bookings.cancel(booking.id).await?;
            output::print_success(&format!("Booking {} cancelled", booking.id.short()));
            Ok(true)
        }
        BookingCommand::Extend { id, days, until } => {
            let booking = resolve_booking(state, id).await?;
            let extended = match (days, until) {
                (Some(days), _) => state.bookings.extend(booking.id, *days).await?,
                (None, Some(until)) => state.bookings.extend_to(booking.id, *until).await?,
                (None, None) => {
                    return Err(AppError::validation("Pass either --days or --until"));
                }
            };
            output::print_success(&format!(
                "Stay extended to {} (total {})",
                extended.check_out(),
                output::format_amount(extended.total_amount)
            ));
            Ok(true)
        }
        BookingCommand::Arrivals { date } => {
            let day = date.unwrap_or_else(super::today);
            let bookings = state.bookings.arrivals(day).await?;
            print_bookings(state, &bookings, format).await?;
            Ok(false)
        }
        BookingCommand::Departures { date } => {
            let day = date.unwrap_or_else(super::today);
            let bookings = state.bookings.departures(day).await?;
            print_bookings(state, &bookings, format).await?;
            Ok(false)
        }
        BookingCommand::Delete { id } => {
            let booking = resolve_booking(state, id).await?;
            state.bookings.delete_booking(booking.id).await?;
            output::print_warning(&format!("Booking {} deleted", booking.id.short()));
            Ok(true)
        }
    }
}
