//! # innkeep-engine
//!
//! The availability engine. Every operation is a synchronous, pure function
//! over a snapshot of rooms and bookings handed in by the caller; nothing is
//! cached between calls and nothing is written.
//!
//! The engine is a pre-check for the front desk. Under concurrent writes the
//! booking store remains the final arbiter and may still reject a booking
//! the engine accepted.

pub mod availability;
pub mod calendar;
pub mod error;
pub mod lifecycle;

pub use availability::{AvailabilityEngine, AvailabilityQuote, StayRequest, find_conflict};
pub use calendar::{CalendarOptions, CalendarWindow, DayCell, RoomRow, WeekProjection};
pub use error::BookingError;
pub use lifecycle::ensure_transition;
