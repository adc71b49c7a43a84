//! Booking lifecycle and availability.

pub mod calendar;
pub mod service;

pub use calendar::{CalendarDay, CalendarRow, WeekCalendar};
pub use service::BookingService;
