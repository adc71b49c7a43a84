//! Booking list filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use innkeep_core::types::{GuestId, RoomId};

use super::model::Booking;
use super::status::BookingStatus;

/// Criteria for listing bookings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    /// Restrict to these statuses.
    pub statuses: Option<Vec<BookingStatus>>,
    /// Restrict to one room.
    pub room_id: Option<RoomId>,
    /// Restrict to one guest.
    pub guest_id: Option<GuestId>,
    /// Arrival day equals this date.
    pub check_in_on: Option<NaiveDate>,
    /// Departure day equals this date.
    pub check_out_on: Option<NaiveDate>,
}

impl BookingFilter {
    /// Filter matching every booking.
    pub fn all() -> Self {
        Self::default()
    }

    /// Bookings of one room.
    pub fn for_room(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::default()
        }
    }

    /// Restrict to a single status.
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.statuses = Some(vec![status]);
        self
    }

    /// Restrict to bookings that hold their room.
    pub fn active(mut self) -> Self {
        self.statuses = Some(BookingStatus::ACTIVE.to_vec());
        self
    }

    /// Check whether a booking satisfies every set criterion.
    pub fn matches(&self, booking: &Booking) -> bool {
        self.statuses
            .as_ref()
            .is_none_or(|statuses| statuses.contains(&booking.status))
            && self.room_id.is_none_or(|id| id == booking.room_id)
            && self.guest_id.is_none_or(|id| id == booking.guest_id)
            && self.check_in_on.is_none_or(|d| d == booking.check_in())
            && self.check_out_on.is_none_or(|d| d == booking.check_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::model::NewBooking;
    use crate::booking::status::PaymentStatus;
    use chrono::Utc;
    use innkeep_core::types::StayRange;

    fn booking(room_id: RoomId) -> Booking {
        NewBooking {
            room_id,
            guest_id: GuestId::new(),
            stay: StayRange::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            )
            .unwrap(),
            adults: 1,
            children: 0,
            total_amount: 400,
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
        .into_booking(Utc::now())
    }

    #[test]
    fn test_default_matches_everything() {
        assert!(BookingFilter::all().matches(&booking(RoomId::new())));
    }

    #[test]
    fn test_room_and_status() {
        let room = RoomId::new();
        let b = booking(room);
        assert!(BookingFilter::for_room(room).active().matches(&b));
        assert!(!BookingFilter::for_room(RoomId::new()).matches(&b));
        assert!(
            !BookingFilter::for_room(room)
                .with_status(BookingStatus::Cancelled)
                .matches(&b)
        );
    }

    #[test]
    fn test_arrival_day() {
        let b = booking(RoomId::new());
        let filter = BookingFilter {
            check_in_on: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        assert!(filter.matches(&b));
        let filter = BookingFilter {
            check_out_on: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        assert!(!filter.matches(&b));
    }
}
