//! Room entity model.

use serde::{Deserialize, Serialize};

use innkeep_core::types::{RoomId, StayRange};

use super::status::{RoomStatus, RoomType};

/// Highest nightly rate the catalog accepts.
pub const MAX_PRICE_PER_NIGHT: i64 = 1_000_000_000;

/// A bookable room in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Number shown on the door, e.g. `"204"`.
    pub number: String,
    /// Room category.
    pub room_type: RoomType,
    /// Maximum number of occupants (adults + children).
    pub capacity: u32,
    /// Nightly rate in whole currency units.
    pub price_per_night: i64,
    /// Housekeeping status.
    pub status: RoomStatus,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Room {
    /// Create an available room with no amenities.
    pub fn new(number: impl Into<String>, room_type: RoomType, capacity: u32, price_per_night: i64) -> Self {
        Self {
            id: RoomId::new(),
            number: number.into(),
            room_type,
            capacity,
            price_per_night,
            status: RoomStatus::Available,
            amenities: Vec::new(),
            description: None,
        }
    }

    /// Whether a party of this size fits.
    pub fn fits(&self, occupants: u32) -> bool {
        occupants <= self.capacity
    }

    /// Price of the given stay at this room's nightly rate, `None` on
    /// overflow.
    pub fn price_for(&self, stay: &StayRange) -> Option<i64> {
        self.price_per_night.checked_mul(stay.nights())
    }
}
