//! Booking domain entities.

pub mod filter;
pub mod model;
pub mod status;

pub use filter::BookingFilter;
pub use model::{Booking, CreateBookingRequest, NewBooking};
pub use status::{BookingStatus, PaymentStatus};
