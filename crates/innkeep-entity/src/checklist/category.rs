//! Checklist category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use innkeep_core::AppError;

/// Grouping tag for checklist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    /// Keys, fixtures, general condition.
    RoomInspection,
    /// TV, mini bar, toiletries.
    Amenities,
    /// Linen, towels, bathroom.
    Cleaning,
    /// Air conditioning, plumbing, lights.
    Maintenance,
    /// Guest-facing information and requests.
    GuestServices,
}

impl ChecklistCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoomInspection => "room_inspection",
            Self::Amenities => "amenities",
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::GuestServices => "guest_services",
        }
    }
}

impl fmt::Display for ChecklistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChecklistCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "room_inspection" => Ok(Self::RoomInspection),
            "amenities" => Ok(Self::Amenities),
            "cleaning" => Ok(Self::Cleaning),
            "maintenance" => Ok(Self::Maintenance),
            "guest_services" => Ok(Self::GuestServices),
            _ => Err(AppError::validation(format!(
                "Invalid checklist category: '{s}'. Expected one of: room_inspection, amenities, cleaning, maintenance, guest_services"
            ))),
        }
    }
}
