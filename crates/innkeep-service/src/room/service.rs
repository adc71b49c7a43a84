//! Room catalog operations.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use innkeep_core::error::AppError;
use innkeep_core::types::{RoomId, StayRange};
use innkeep_engine::{AvailabilityEngine, BookingError};
use innkeep_entity::booking::BookingFilter;
use innkeep_entity::room::{Room, RoomStatus, RoomType};
use innkeep_store::{BookingStore, RoomCatalog};

/// Manages the room catalog.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room catalog.
    rooms: Arc<dyn RoomCatalog>,
    /// Booking store, for free-room searches.
    bookings: Arc<dyn BookingStore>,
}

/// Request to add a room to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Door number, unique in the catalog.
    #[validate(length(min = 1, max = 20, message = "room number is required"))]
    pub number: String,
    pub room_type: RoomType,
    /// Maximum occupants.
    #[validate(range(min = 1, message = "a room must sleep at least one person"))]
    pub capacity: u32,
    /// Nightly rate in whole currency units.
    #[validate(range(min = 0, max = 1000000000, message = "price must be between 0 and 1,000,000,000"))]
    pub price_per_night: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Optional filters for listing rooms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoomQuery {
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(rooms: Arc<dyn RoomCatalog>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { rooms, bookings }
    }

    /// Adds a room.
    pub async fn create(&self, req: CreateRoomRequest) -> Result<Room, AppError> {
        req.validate()?;

        let mut room = Room::new(req.number.trim(), req.room_type, req.capacity, req.price_per_night);
        room.amenities = req.amenities;
        room.description = req.description;

        let room = self.rooms.upsert_room(room).await?;
        info!(room_id = %room.id, number = %room.number, "Room created");
        Ok(room)
    }

    /// Gets a room by ID.
    pub async fn get(&self, id: RoomId) -> Result<Room, AppError> {
        self.rooms
            .get_room(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {id} not found")))
    }

    /// Finds a room by its door number.
    pub async fn find_by_number(&self, number: &str) -> Result<Room, AppError> {
        self.rooms
            .list_rooms()
            .await?
            .into_iter()
            .find(|r| r.number == number)
            .ok_or_else(|| AppError::not_found(format!("Room '{number}' not found")))
    }

    /// Rooms ordered by number, narrowed by `query`.
    pub async fn list(&self, query: RoomQuery) -> Result<Vec<Room>, AppError> {
        let rooms = self.rooms.list_rooms().await?;
        Ok(rooms
            .into_iter()
            .filter(|r| query.status.is_none_or(|s| s == r.status))
            .filter(|r| query.room_type.is_none_or(|t| t == r.room_type))
            .collect())
    }

    /// Rooms free for the whole stay `[check_in, check_out)` that sleep
    /// `occupants`, optionally of one type, ordered by number.
    pub async fn available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        occupants: u32,
        room_type: Option<RoomType>,
    ) -> Result<Vec<Room>, AppError> {
        let stay = StayRange::new(check_in, check_out)
            .ok_or(BookingError::InvalidDateRange { check_in, check_out })?;

        let rooms = self.rooms.list_rooms().await?;
        let bookings = self
            .bookings
            .list_bookings(&BookingFilter::all().active())
            .await?;

        Ok(AvailabilityEngine::new(&rooms, &bookings)
            .available_rooms(&stay, occupants)
            .into_iter()
            .filter(|r| room_type.is_none_or(|t| t == r.room_type))
            .cloned()
            .collect())
    }

    /// Changes a room's status, e.g. to take it out for maintenance.
    pub async fn set_status(&self, id: RoomId, status: RoomStatus) -> Result<Room, AppError> {
        self.rooms.set_room_status(id, status).await
    }
}
