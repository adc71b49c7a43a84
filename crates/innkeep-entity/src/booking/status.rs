//! Booking lifecycle and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use innkeep_core::AppError;

/// Lifecycle status of a booking.
///
/// ```text
/// confirmed --check-in--> checked_in --check-out--> checked_out
/// confirmed --cancel-->   cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reserved, guest not yet arrived.
    Confirmed,
    /// Guest is in the room.
    CheckedIn,
    /// Guest has left.
    CheckedOut,
    /// Reservation withdrawn before arrival.
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold the room and therefore block other bookings.
    pub const ACTIVE: [BookingStatus; 2] = [Self::Confirmed, Self::CheckedIn];

    /// Check if the booking still holds its room.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Confirmed, Self::CheckedIn)
                | (Self::CheckedIn, Self::CheckedOut)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "checked_in" => Ok(Self::CheckedIn),
            "checked_out" => Ok(Self::CheckedOut),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid booking status: '{s}'. Expected one of: confirmed, checked_in, checked_out, cancelled"
            ))),
        }
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing received yet.
    #[default]
    Pending,
    /// Settled in full.
    Paid,
    /// Deposit or part payment received.
    PartiallyPaid,
    /// Money returned to the guest.
    Refunded,
}

impl PaymentStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::PartiallyPaid => "partially_paid",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "partially_paid" | "partial" => Ok(Self::PartiallyPaid),
            "refunded" => Ok(Self::Refunded),
            _ => Err(AppError::validation(format!(
                "Invalid payment status: '{s}'. Expected one of: pending, paid, partially_paid, refunded"
            ))),
        }
    }
}
