//! Typed failures of the availability engine.

use thiserror::Error;

use innkeep_core::error::{AppError, ErrorKind};
use innkeep_core::types::{BookingId, RoomId, StayRange};
use innkeep_entity::booking::BookingStatus;

/// Why a booking request, status change or extension was refused.
///
/// Every variant describes a local, recoverable failure: the engine never
/// retries and leaves its inputs untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The requested room is not in the catalog snapshot.
    #[error("Room {0} not found")]
    RoomNotFound(RoomId),

    /// Check-out is not strictly after check-in.
    #[error("Check-out date {check_out} must be after check-in date {check_in}")]
    InvalidDateRange {
        /// Requested arrival.
        check_in: chrono::NaiveDate,
        /// Requested departure.
        check_out: chrono::NaiveDate,
    },

    /// A booking needs at least one adult.
    #[error("A booking needs at least one adult (got {adults} adults, {children} children)")]
    InvalidPartySize {
        /// Requested adults.
        adults: u32,
        /// Requested children.
        children: u32,
    },

    /// The party does not fit in the room.
    #[error("Party of {requested} exceeds room capacity of {capacity}")]
    CapacityExceeded {
        /// Adults plus children.
        requested: u32,
        /// Room capacity.
        capacity: u32,
    },

    /// An active booking already holds the room for part of the stay.
    #[error("Room is not available: booking {conflicting} holds it for {stay}")]
    BookingConflict {
        /// The booking in the way.
        conflicting: BookingId,
        /// Its stay.
        stay: StayRange,
    },

    /// The requested status change is not part of the lifecycle.
    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: BookingStatus,
        /// Requested status.
        to: BookingStatus,
    },

    /// Extending the stay would run into another booking.
    #[error("Cannot extend stay: booking {conflicting} holds the room for {stay}")]
    ExtensionConflict {
        /// The booking in the way.
        conflicting: BookingId,
        /// Its stay.
        stay: StayRange,
    },

    /// An extension must add at least one night.
    #[error("An extension must add at least one night (got {additional_days})")]
    InvalidExtension {
        /// Requested extra nights.
        additional_days: u32,
    },

    /// The amount due does not fit in the currency range.
    #[error("Amount for {nights} nights at {price_per_night} per night is out of range")]
    AmountOverflow {
        /// Nightly rate.
        price_per_night: i64,
        /// Nights being charged.
        nights: i64,
    },

    /// Only confirmed or checked-in bookings can be extended.
    #[error("Booking {booking} is {status} and can no longer be changed")]
    BookingNotActive {
        /// The booking.
        booking: BookingId,
        /// Its status.
        status: BookingStatus,
    },
}

impl BookingError {
    /// The application-wide category this failure maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound(_) => ErrorKind::NotFound,
            Self::InvalidDateRange { .. }
            | Self::InvalidPartySize { .. }
            | Self::CapacityExceeded { .. }
            | Self::InvalidExtension { .. }
            | Self::AmountOverflow { .. } => ErrorKind::Validation,
            Self::BookingConflict { .. }
            | Self::InvalidTransition { .. }
            | Self::ExtensionConflict { .. }
            | Self::BookingNotActive { .. } => ErrorKind::Conflict,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::with_source(err.kind(), err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_into_app_error_with_source() {
        let err = BookingError::CapacityExceeded {
            requested: 3,
            capacity: 2,
        };
        let app: AppError = err.clone().into();
        assert_eq!(app.kind, ErrorKind::Validation);
        assert_eq!(app.source_as::<BookingError>(), Some(&err));
    }

    #[test]
    fn test_conflict_kinds() {
        let err = BookingError::InvalidTransition {
            from: BookingStatus::CheckedOut,
            to: BookingStatus::CheckedIn,
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            BookingError::RoomNotFound(RoomId::new()).kind(),
            ErrorKind::NotFound
        );
    }
}
