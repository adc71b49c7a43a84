//! Stay availability and extension checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use innkeep_core::types::{BookingId, RoomId, StayRange};
use innkeep_entity::booking::Booking;
use innkeep_entity::room::Room;

use crate::calendar::{CalendarOptions, CalendarWindow, WeekProjection};
use crate::error::BookingError;

/// A prospective stay, as typed in by the front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRequest {
    /// Room to book.
    pub room_id: RoomId,
    /// Arrival day.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Number of adults.
    pub adults: u32,
    /// Number of children.
    pub children: u32,
}

/// What an accepted stay would cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuote {
    /// The room.
    pub room_id: RoomId,
    /// The validated stay.
    pub stay: StayRange,
    /// Number of nights.
    pub nights: i64,
    /// Nightly rate used.
    pub price_per_night: i64,
    /// Nights times rate.
    pub total_amount: i64,
}

/// Find the first active booking of `room_id` overlapping `stay`, ignoring
/// `exclude`.
///
/// Only `confirmed` and `checked_in` bookings hold a room.
pub fn find_conflict<'b>(
    bookings: impl IntoIterator<Item = &'b Booking>,
    room_id: RoomId,
    stay: &StayRange,
    exclude: Option<BookingId>,
) -> Option<&'b Booking> {
    bookings.into_iter().find(|b| {
        b.room_id == room_id
            && b.is_active()
            && Some(b.id) != exclude
            && b.stay.overlaps(stay)
    })
}

/// Availability checks over an immutable snapshot of the catalog and the
/// booking list.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityEngine<'a> {
    rooms: &'a [Room],
    bookings: &'a [Booking],
}

impl<'a> AvailabilityEngine<'a> {
    /// Wrap a snapshot.
    pub fn new(rooms: &'a [Room], bookings: &'a [Booking]) -> Self {
        Self { rooms, bookings }
    }

    /// Look up a room by id.
    pub fn room(&self, room_id: RoomId) -> Result<&'a Room, BookingError> {
        self.rooms
            .iter()
            .find(|r| r.id == room_id)
            .ok_or(BookingError::RoomNotFound(room_id))
    }

    /// Decide whether `request` may become a new booking.
    ///
    /// Checks run in a fixed order and stop at the first failure: room
    /// lookup, date range, party size, capacity, overlap.
    pub fn check_availability(&self, request: &StayRequest) -> Result<AvailabilityQuote, BookingError> {
        let room = self.room(request.room_id)?;

        let stay = StayRange::new(request.check_in, request.check_out).ok_or(
            BookingError::InvalidDateRange {
                check_in: request.check_in,
                check_out: request.check_out,
            },
        )?;

        if request.adults == 0 {
            return Err(BookingError::InvalidPartySize {
                adults: request.adults,
                children: request.children,
            });
        }

        let requested = request.adults.saturating_add(request.children);
        if !room.fits(requested) {
            debug!(room = %room.number, requested, capacity = room.capacity, "Party too large");
            return Err(BookingError::CapacityExceeded {
                requested,
                capacity: room.capacity,
            });
        }

        if let Some(existing) = find_conflict(self.bookings, room.id, &stay, None) {
            debug!(
                room = %room.number,
                %stay,
                conflicting = %existing.id,
                "Stay overlaps an active booking"
            );
            return Err(BookingError::BookingConflict {
                conflicting: existing.id,
                stay: existing.stay,
            });
        }

        let total_amount = room.price_for(&stay).ok_or(BookingError::AmountOverflow {
            price_per_night: room.price_per_night,
            nights: stay.nights(),
        })?;

        Ok(AvailabilityQuote {
            room_id: room.id,
            stay,
            nights: stay.nights(),
            price_per_night: room.price_per_night,
            total_amount,
        })
    }

    /// Rooms that sleep `occupants` and have no active booking overlapping
    /// `stay`, in catalog order.
    ///
    /// Room housekeeping status is not consulted.
    pub fn available_rooms(&self, stay: &StayRange, occupants: u32) -> Vec<&'a Room> {
        let rooms: Vec<&'a Room> = self
            .rooms
            .iter()
            .filter(|room| room.fits(occupants))
            .filter(|room| find_conflict(self.bookings, room.id, stay, None).is_none())
            .collect();
        debug!(%stay, occupants, available = rooms.len(), "Searched free rooms");
        rooms
    }

    /// Compute `booking` pushed out by `additional_days` nights.
    ///
    /// Returns the updated copy; the input is never modified, so on any
    /// error the caller still holds the original booking.
    pub fn extend_booking(&self, booking: &Booking, additional_days: u32) -> Result<Booking, BookingError> {
        if !booking.is_active() {
            return Err(BookingError::BookingNotActive {
                booking: booking.id,
                status: booking.status,
            });
        }

        let (extra, extended) = booking
            .stay
            .extension(additional_days)
            .zip(booking.stay.extended_by(additional_days))
            .ok_or(BookingError::InvalidExtension { additional_days })?;

        let room = self.room(booking.room_id)?;

        if let Some(existing) = find_conflict(self.bookings, room.id, &extra, Some(booking.id)) {
            debug!(
                booking = %booking.id,
                additional_days,
                conflicting = %existing.id,
                "Extension overlaps an active booking"
            );
            return Err(BookingError::ExtensionConflict {
                conflicting: existing.id,
                stay: existing.stay,
            });
        }

        let total_amount = i64::from(additional_days)
            .checked_mul(room.price_per_night)
            .and_then(|extra| booking.total_amount.checked_add(extra))
            .ok_or(BookingError::AmountOverflow {
                price_per_night: room.price_per_night,
                nights: i64::from(additional_days),
            })?;

        let mut updated = booking.clone();
        updated.stay = extended;
        updated.total_amount = total_amount;
        Ok(updated)
    }

    /// Lay the snapshot out on a calendar window.
    pub fn project_week(&self, window: CalendarWindow, options: &CalendarOptions) -> WeekProjection<'a> {
        WeekProjection::build(self.rooms, self.bookings, window, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use innkeep_core::types::GuestId;
    use innkeep_entity::booking::{BookingStatus, NewBooking, PaymentStatus};
    use innkeep_entity::room::RoomType;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn room(capacity: u32) -> Room {
        Room::new("101", RoomType::Double, capacity, 100)
    }

    fn booking(room: &Room, check_in: &str, check_out: &str, status: BookingStatus) -> Booking {
        let stay = StayRange::new(d(check_in), d(check_out)).expect("valid stay");
        let mut b = NewBooking {
            room_id: room.id,
            guest_id: GuestId::new(),
            stay,
            adults: 1,
            children: 0,
            total_amount: room.price_for(&stay).expect("price fits"),
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
        .into_booking(Utc::now());
        b.status = status;
        b
    }

    fn request(room: &Room, check_in: &str, check_out: &str, adults: u32, children: u32) -> StayRequest {
        StayRequest {
            room_id: room.id,
            check_in: d(check_in),
            check_out: d(check_out),
            adults,
            children,
        }
    }

    #[test]
    fn test_overlapping_request_conflicts() {
        let room = room(2);
        let existing = booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed);
        let rooms = [room.clone()];
        let bookings = [existing.clone()];
        let engine = AvailabilityEngine::new(&rooms, &bookings);

        let result = engine.check_availability(&request(&room, "2024-06-03", "2024-06-06", 1, 0));
        assert_eq!(
            result,
            Err(BookingError::BookingConflict {
                conflicting: existing.id,
                stay: existing.stay,
            })
        );
    }

    #[test]
    fn test_touching_at_checkout_is_accepted() {
        let room = room(2);
        let rooms = [room.clone()];
        let bookings = [booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed)];
        let engine = AvailabilityEngine::new(&rooms, &bookings);

        let quote = engine
            .check_availability(&request(&room, "2024-06-05", "2024-06-08", 1, 0))
            .expect("same-day turnover is free");
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_amount, 300);
    }

    #[test]
    fn test_inactive_bookings_do_not_block() {
        let room = room(2);
        let rooms = [room.clone()];
        let bookings = [
            booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Cancelled),
            booking(&room, "2024-06-01", "2024-06-05", BookingStatus::CheckedOut),
        ];
        let engine = AvailabilityEngine::new(&rooms, &bookings);
        assert!(engine
            .check_availability(&request(&room, "2024-06-02", "2024-06-04", 2, 0))
            .is_ok());
    }

    #[test]
    fn test_checked_in_booking_blocks() {
        let room = room(2);
        let rooms = [room.clone()];
        let bookings = [booking(&room, "2024-06-01", "2024-06-05", BookingStatus::CheckedIn)];
        let engine = AvailabilityEngine::new(&rooms, &bookings);
        assert!(matches!(
            engine.check_availability(&request(&room, "2024-06-04", "2024-06-05", 1, 0)),
            Err(BookingError::BookingConflict { .. })
        ));
    }

    #[test]
    fn test_other_rooms_do_not_block() {
        let room = room(2);
        let other = Room::new("102", RoomType::Single, 1, 80);
        let rooms = [room.clone(), other.clone()];
        let bookings = [booking(&other, "2024-06-01", "2024-06-05", BookingStatus::Confirmed)];
        let engine = AvailabilityEngine::new(&rooms, &bookings);
        assert!(engine
            .check_availability(&request(&room, "2024-06-01", "2024-06-05", 1, 0))
            .is_ok());
    }

    #[test]
    fn test_capacity_boundary() {
        let room = room(2);
        let rooms = [room.clone()];
        let engine = AvailabilityEngine::new(&rooms, &[]);

        assert!(engine
            .check_availability(&request(&room, "2024-06-01", "2024-06-02", 1, 1))
            .is_ok());
        assert_eq!(
            engine.check_availability(&request(&room, "2024-06-01", "2024-06-02", 2, 1)),
            Err(BookingError::CapacityExceeded {
                requested: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_checks_run_in_order() {
        let room = room(1);
        let rooms = [room.clone()];
        let bookings = [booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed)];
        let engine = AvailabilityEngine::new(&rooms, &bookings);

        // Bad dates win over the capacity and overlap problems.
        assert!(matches!(
            engine.check_availability(&request(&room, "2024-06-03", "2024-06-03", 5, 0)),
            Err(BookingError::InvalidDateRange { .. })
        ));
        // Capacity wins over overlap.
        assert!(matches!(
            engine.check_availability(&request(&room, "2024-06-02", "2024-06-03", 2, 0)),
            Err(BookingError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            engine.check_availability(&request(&room, "2024-06-02", "2024-06-03", 0, 1)),
            Err(BookingError::InvalidPartySize { .. })
        ));
    }

    #[test]
    fn test_unknown_room() {
        let room = room(2);
        let engine = AvailabilityEngine::new(&[], &[]);
        assert_eq!(
            engine.check_availability(&request(&room, "2024-06-01", "2024-06-02", 1, 0)),
            Err(BookingError::RoomNotFound(room.id))
        );
    }

    #[test]
    fn test_check_is_idempotent() {
        let room = room(2);
        let rooms = [room.clone()];
        let bookings = [booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed)];
        let engine = AvailabilityEngine::new(&rooms, &bookings);

        for req in [
            request(&room, "2024-06-03", "2024-06-06", 1, 0),
            request(&room, "2024-06-05", "2024-06-07", 1, 0),
        ] {
            assert_eq!(engine.check_availability(&req), engine.check_availability(&req));
        }
    }

    #[test]
    fn test_accepted_bookings_are_pairwise_disjoint() {
        let room = room(2);
        let rooms = [room.clone()];
        let start = d("2024-06-01");
        let mut accepted: Vec<Booking> = Vec::new();

        // Try every stay of 1..=4 nights starting in the first 10 days.
        for offset in 0..10u64 {
            for nights in 1..=4u64 {
                let check_in = start + chrono::Days::new(offset);
                let check_out = check_in + chrono::Days::new(nights);
                let req = StayRequest {
                    room_id: room.id,
                    check_in,
                    check_out,
                    adults: 1,
                    children: 0,
                };
                let engine = AvailabilityEngine::new(&rooms, &accepted);
                if let Ok(quote) = engine.check_availability(&req) {
                    let mut b = booking(&room, "2024-01-01", "2024-01-02", BookingStatus::Confirmed);
                    b.stay = quote.stay;
                    accepted.push(b);
                }
            }
        }

        assert!(!accepted.is_empty());
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                assert!(
                    a.check_out() <= b.check_in() || b.check_out() <= a.check_in(),
                    "{} overlaps {}",
                    a.stay,
                    b.stay
                );
            }
        }
    }

    #[test]
    fn test_extend_success() {
        let room = room(2);
        let rooms = [room.clone()];
        let current = booking(&room, "2024-06-01", "2024-06-05", BookingStatus::CheckedIn);
        let bookings = [current.clone()];
        let engine = AvailabilityEngine::new(&rooms, &bookings);

        let extended = engine.extend_booking(&current, 2).expect("room is free");
        assert_eq!(extended.check_out(), d("2024-06-07"));
        assert_eq!(extended.check_in(), current.check_in());
        assert_eq!(extended.total_amount, current.total_amount + 2 * 100);
        assert_eq!(extended.id, current.id);
    }

    #[test]
    fn test_extend_conflict_leaves_booking_unchanged() {
        let room = room(2);
        let rooms = [room.clone()];
        let current = booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed);
        let next = booking(&room, "2024-06-06", "2024-06-09", BookingStatus::Confirmed);
        let bookings = [current.clone(), next.clone()];
        let engine = AvailabilityEngine::new(&rooms, &bookings);
        let before = current.clone();

        assert_eq!(
            engine.extend_booking(&current, 2),
            Err(BookingError::ExtensionConflict {
                conflicting: next.id,
                stay: next.stay,
            })
        );
        assert_eq!(current, before);

        // One night still fits before the next arrival.
        let extended = engine.extend_booking(&current, 1).expect("one night is free");
        assert_eq!(extended.check_out(), d("2024-06-06"));
    }

    #[test]
    fn test_extend_rejects_zero_days_and_inactive_bookings() {
        let room = room(2);
        let rooms = [room.clone()];
        let current = booking(&room, "2024-06-01", "2024-06-05", BookingStatus::Confirmed);
        let done = booking(&room, "2024-05-01", "2024-05-05", BookingStatus::CheckedOut);
        let engine = AvailabilityEngine::new(&rooms, &[]);

        assert_eq!(
            engine.extend_booking(&current, 0),
            Err(BookingError::InvalidExtension { additional_days: 0 })
        );
        assert!(matches!(
            engine.extend_booking(&done, 1),
            Err(BookingError::BookingNotActive { .. })
        ));
    }

    #[test]
    fn test_price_overflow_is_typed_error() {
        let room = Room::new("PH", RoomType::Suite, 2, i64::MAX / 2);
        let rooms = [room.clone()];
        let engine = AvailabilityEngine::new(&rooms, &[]);

        assert_eq!(
            engine.check_availability(&request(&room, "2024-06-01", "2024-06-04", 1, 0)),
            Err(BookingError::AmountOverflow {
                price_per_night: i64::MAX / 2,
                nights: 3,
            })
        );
    }

    #[test]
    fn test_extension_overflow_is_typed_error() {
        let room = Room::new("PH", RoomType::Suite, 2, i64::MAX / 4);
        let rooms = [room.clone()];
        let mut current = booking(&room, "2024-06-01", "2024-06-02", BookingStatus::Confirmed);
        current.total_amount = i64::MAX / 4;
        let engine = AvailabilityEngine::new(&rooms, &[]);

        assert!(matches!(
            engine.extend_booking(&current, 5),
            Err(BookingError::AmountOverflow { nights: 5, .. })
        ));
    }

    #[test]
    fn test_available_rooms() {
        let double = room(2);
        let single = Room::new("102", RoomType::Single, 1, 80);
        let suite = Room::new("103", RoomType::Suite, 4, 250);
        let rooms = [double.clone(), single.clone(), suite.clone()];
        let bookings = [
            booking(&double, "2024-06-01", "2024-06-05", BookingStatus::Confirmed),
            booking(&suite, "2024-06-01", "2024-06-05", BookingStatus::Cancelled),
        ];
        let engine = AvailabilityEngine::new(&rooms, &bookings);
        let stay = StayRange::new(d("2024-06-03"), d("2024-06-06")).unwrap();

        let free: Vec<_> = engine.available_rooms(&stay, 1).iter().map(|r| r.id).collect();
        assert_eq!(free, vec![single.id, suite.id]);

        let free: Vec<_> = engine.available_rooms(&stay, 2).iter().map(|r| r.id).collect();
        assert_eq!(free, vec![suite.id]);

        // Turnover day: the double frees up on its guest's departure.
        let later = StayRange::new(d("2024-06-05"), d("2024-06-07")).unwrap();
        assert_eq!(engine.available_rooms(&later, 2).len(), 2);
    }
}
