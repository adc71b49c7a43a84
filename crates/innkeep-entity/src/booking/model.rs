//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use innkeep_core::types::{BookingId, GuestId, RoomId, StayRange};

use super::status::{BookingStatus, PaymentStatus};

/// A reservation of one room by one guest for a half-open stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The booked room.
    pub room_id: RoomId,
    /// The guest holding the booking.
    pub guest_id: GuestId,
    /// Stay dates; the check-out day is not occupied.
    pub stay: StayRange,
    /// Number of adults (at least one).
    pub adults: u32,
    /// Number of children.
    #[serde(default)]
    pub children: u32,
    /// Amount due: nights times nightly rate, plus extensions.
    pub total_amount: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Payment status.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Arrival day.
    pub fn check_in(&self) -> NaiveDate {
        self.stay.check_in()
    }

    /// Departure day.
    pub fn check_out(&self) -> NaiveDate {
        self.stay.check_out()
    }

    /// Total occupants.
    pub fn party_size(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Check if the booking still holds its room.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether this booking occupies the room on the night starting `day`.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        self.stay.contains(day)
    }
}

/// Data handed to the booking store to persist a new booking.
///
/// The store assigns the id and timestamps and always starts the booking
/// as [`BookingStatus::Confirmed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// The booked room.
    pub room_id: RoomId,
    /// The guest.
    pub guest_id: GuestId,
    /// Stay dates.
    pub stay: StayRange,
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
    /// Amount due.
    pub total_amount: i64,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Staff notes.
    pub notes: Option<String>,
}

impl NewBooking {
    /// Materialize the stored record.
    pub fn into_booking(self, now: DateTime<Utc>) -> Booking {
        Booking {
            id: BookingId::new(),
            room_id: self.room_id,
            guest_id: self.guest_id,
            stay: self.stay,
            adults: self.adults,
            children: self.children,
            total_amount: self.total_amount,
            status: BookingStatus::Confirmed,
            payment_status: self.payment_status,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to book a room, as submitted by the front desk.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Room to book.
    pub room_id: RoomId,
    /// Guest making the booking.
    pub guest_id: GuestId,
    /// Arrival day.
    pub check_in_date: NaiveDate,
    /// Departure day.
    pub check_out_date: NaiveDate,
    /// Number of adults. The party check happens in the availability
    /// engine, after the date range check.
    pub adults: u32,
    /// Number of children.
    #[serde(default)]
    pub children: u32,
    /// Initial payment status (defaults to pending).
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    /// Staff notes.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(adults: u32) -> CreateBookingRequest {
        CreateBookingRequest {
            room_id: RoomId::new(),
            guest_id: GuestId::new(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            adults,
            children: 2,
            payment_status: None,
            notes: None,
        }
    }

    #[test]
    fn test_request_leaves_party_checks_to_engine() {
        assert!(request(0).validate().is_ok());
    }

    #[test]
    fn test_request_rejects_long_notes() {
        let mut req = request(1);
        req.notes = Some("x".repeat(2001));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_party_size() {
        let stay = StayRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )
        .unwrap();
        let booking = NewBooking {
            room_id: RoomId::new(),
            guest_id: GuestId::new(),
            stay,
            adults: 2,
            children: 1,
            total_amount: 0,
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
        .into_booking(Utc::now());
        assert_eq!(booking.party_size(), 3);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }
}
