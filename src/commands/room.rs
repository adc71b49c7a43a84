//! Room catalog commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_entity::room::{Room, RoomStatus, RoomType};
use innkeep_service::{CreateRoomRequest, RoomQuery, ServiceState};

use crate::output::{self, OutputFormat};

/// Arguments for room commands
#[derive(Debug, Args)]
pub struct RoomArgs {
    /// Room subcommand
    #[command(subcommand)]
    pub command: RoomCommand,
}

/// Room subcommands
#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// List rooms
    List {
        /// Only rooms with this status (available, occupied, maintenance)
        #[arg(long)]
        status: Option<RoomStatus>,
        /// Only rooms of this type (single, double, suite, family, deluxe)
        #[arg(long = "type")]
        room_type: Option<RoomType>,
    },
    /// Rooms free for a whole stay
    Available {
        /// First night
        #[arg(long)]
        check_in: NaiveDate,
        /// Departure day
        #[arg(long)]
        check_out: NaiveDate,
        /// Guests to sleep
        #[arg(long, default_value_t = 1)]
        occupants: u32,
        /// Only rooms of this type
        #[arg(long = "type")]
        room_type: Option<RoomType>,
    },
    /// Add a room to the catalog
    Add {
        /// Room number
        #[arg(short, long)]
        number: String,
        /// Room type
        #[arg(short = 't', long = "type")]
        room_type: RoomType,
        /// Maximum occupants
        #[arg(short, long)]
        capacity: u32,
        /// Nightly price
        #[arg(short, long)]
        price: i64,
        /// Amenity label (repeatable)
        #[arg(short, long = "amenity")]
        amenities: Vec<String>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change a room's status
    Status {
        /// Room number
        number: String,
        /// New status
        status: RoomStatus,
    },
}

/// Room display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct RoomRow {
    /// Room number
    number: String,
    /// Type
    #[tabled(rename = "type")]
    room_type: String,
    /// Capacity
    capacity: u32,
    /// Nightly price
    price: String,
    /// Status
    status: String,
    /// Amenities
    amenities: String,
}

impl From<&Room> for RoomRow {
    fn from(room: &Room) -> Self {
        Self {
            number: room.number.clone(),
            room_type: room.room_type.to_string(),
            capacity: room.capacity,
            price: output::format_amount(room.price_per_night),
            status: room.status.to_string(),
            amenities: room.amenities.join(", "),
        }
    }
}

/// Execute room commands
pub async fn execute(
    args: &RoomArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        RoomCommand::List { status, room_type } => {
            let rooms = state
                .rooms
                .list(RoomQuery {
                    status: *status,
                    room_type: *room_type,
                })
                .await?;
            let rows: Vec<RoomRow> = rooms.iter().map(RoomRow::from).collect();
            output::print_list(&rows, format);
            Ok(false)
        }
        RoomCommand::Available {
            check_in,
            check_out,
            occupants,
            room_type,
        } => {
            let rooms = state
                .rooms
                .available(*check_in, *check_out, *occupants, *room_type)
                .await?;
            let rows: Vec<RoomRow> = rooms.iter().map(RoomRow::from).collect();
            output::print_list(&rows, format);
            Ok(false)
        }
        RoomCommand::Add {
            number,
            room_type,
            capacity,
            price,
            amenities,
            description,
        } => {
            let room = state
                .rooms
                .create(CreateRoomRequest {
                    number: number.clone(),
                    room_type: *room_type,
                    capacity: *capacity,
                    price_per_night: *price,
                    amenities: amenities.clone(),
                    description: description.clone(),
                })
                .await?;
            output::print_success(&format!("Room {} added", room.number));
            output::print_item(&RoomRow::from(&room), format);
            Ok(true)
        }
        RoomCommand::Status { number, status } => {
            let room = state.rooms.find_by_number(number).await?;
            let room = state.rooms.set_status(room.id, *status).await?;
            output::print_success(&format!("Room {} is now {}", room.number, room.status));
            Ok(true)
        }
    }
}
