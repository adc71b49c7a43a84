//! Room category and housekeeping status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use innkeep_core::AppError;

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// One bed, one guest.
    Single,
    /// Two guests.
    Double,
    /// Suite with a separate living area.
    Suite,
    /// Family room with extra beds.
    Family,
    /// Upgraded double.
    Deluxe,
}

impl RoomType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Suite => "suite",
            Self::Family => "family",
            Self::Deluxe => "deluxe",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "suite" => Ok(Self::Suite),
            "family" => Ok(Self::Family),
            "deluxe" => Ok(Self::Deluxe),
            _ => Err(AppError::validation(format!(
                "Invalid room type: '{s}'. Expected one of: single, double, suite, family, deluxe"
            ))),
        }
    }
}

/// Housekeeping status of a room.
///
/// This is staff-maintained metadata. It does not say whether the room is
/// booked on a given night; availability is always computed from bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Ready for guests.
    Available,
    /// A guest is currently checked in.
    Occupied,
    /// Out of service.
    Maintenance,
}

impl RoomStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(AppError::validation(format!(
                "Invalid room status: '{s}'. Expected one of: available, occupied, maintenance"
            ))),
        }
    }
}
