//! Owned weekly calendar, detached from the store snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use innkeep_core::types::BookingId;
use innkeep_engine::WeekProjection;
use innkeep_entity::room::Room;

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: NaiveDate,
    /// Bookings occupying the room that night.
    pub bookings: Vec<BookingId>,
}

/// One room's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    pub room: Room,
    pub days: Vec<CalendarDay>,
}

/// A materialized [`WeekProjection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCalendar {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub rows: Vec<CalendarRow>,
}

impl WeekCalendar {
    /// Days of the window, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first
            .iter_days()
            .take_while(|d| *d <= self.last)
            .collect()
    }
}

impl From<&WeekProjection<'_>> for WeekCalendar {
    fn from(projection: &WeekProjection<'_>) -> Self {
        let window = projection.window();
        let rows = projection
            .rows()
            .iter()
            .map(|row| CalendarRow {
                room: row.room().clone(),
                days: row
                    .days()
                    .map(|cell| CalendarDay {
                        day: cell.day,
                        bookings: cell.bookings.iter().map(|b| b.id).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            first: window.first(),
            last: window.last(),
            rows,
        }
    }
}
