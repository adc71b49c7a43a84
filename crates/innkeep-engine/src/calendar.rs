//! Weekly calendar projection.
//!
//! The grid has one row per room and one cell per day. A booking fills the
//! cell for day `D` iff `check_in <= D < check_out`, so the departure day is
//! shown free for the night.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use innkeep_core::AppError;
use innkeep_core::config::calendar::CalendarConfig;
use innkeep_entity::booking::{Booking, BookingStatus};
use innkeep_entity::room::Room;

/// An inclusive range of calendar days, `[first, last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarWindow {
    first: NaiveDate,
    last: NaiveDate,
}

impl CalendarWindow {
    /// Build a window; `None` if `last` is before `first`.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        (last >= first).then_some(Self { first, last })
    }

    /// The seven-day week containing `date`, starting on `week_starts_on`.
    pub fn week_containing(date: NaiveDate, week_starts_on: Weekday) -> Self {
        let offset = (date.weekday().num_days_from_monday() + 7
            - week_starts_on.num_days_from_monday())
            % 7;
        let first = date - Days::new(u64::from(offset));
        Self {
            first,
            last: first + Days::new(6),
        }
    }

    /// First day shown.
    pub fn first(&self) -> NaiveDate {
        self.first
    }

    /// Last day shown.
    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Number of days in the window.
    pub fn len(&self) -> usize {
        ((self.last - self.first).num_days() + 1) as usize
    }

    /// A window always holds at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every day of the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }

    /// The window of the same length immediately after this one, `None`
    /// past the end of the calendar.
    pub fn next(&self) -> Option<Self> {
        let span = Days::new(self.len() as u64);
        Some(Self {
            first: self.first.checked_add_days(span)?,
            last: self.last.checked_add_days(span)?,
        })
    }

    /// The window of the same length immediately before this one.
    pub fn previous(&self) -> Option<Self> {
        let span = Days::new(self.len() as u64);
        Some(Self {
            first: self.first.checked_sub_days(span)?,
            last: self.last.checked_sub_days(span)?,
        })
    }
}

/// Display options for the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Keep rows for rooms with nothing booked in the window.
    pub show_empty_rooms: bool,
    /// Draw cancelled bookings too.
    pub include_cancelled: bool,
    /// First day of the week used by [`CalendarWindow::week_containing`].
    pub week_starts_on: Weekday,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            show_empty_rooms: false,
            include_cancelled: false,
            week_starts_on: Weekday::Mon,
        }
    }
}

impl TryFrom<&CalendarConfig> for CalendarOptions {
    type Error = AppError;

    fn try_from(config: &CalendarConfig) -> Result<Self, Self::Error> {
        let week_starts_on = config.week_starts_on.parse::<Weekday>().map_err(|_| {
            AppError::configuration(format!(
                "Invalid calendar.week_starts_on: '{}'",
                config.week_starts_on
            ))
        })?;
        Ok(Self {
            show_empty_rooms: config.show_empty_rooms,
            include_cancelled: config.include_cancelled,
            week_starts_on,
        })
    }
}

/// The bookings drawn in one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell<'a> {
    /// The day (night starting on this day).
    pub day: NaiveDate,
    /// Bookings occupying the room that night.
    pub bookings: Vec<&'a Booking>,
}

impl DayCell<'_> {
    /// Nothing booked for the night.
    pub fn is_free(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// One room's row on the grid.
#[derive(Debug, Clone)]
pub struct RoomRow<'a> {
    room: &'a Room,
    window: CalendarWindow,
    bookings: Vec<&'a Booking>,
}

impl<'a> RoomRow<'a> {
    /// The room.
    pub fn room(&self) -> &'a Room {
        self.room
    }

    /// Bookings touching the window, ordered by arrival.
    pub fn bookings(&self) -> &[&'a Booking] {
        &self.bookings
    }

    /// Cells for each day of the window.
    ///
    /// Computed lazily; every call starts a fresh pass over the window.
    pub fn days(&self) -> impl Iterator<Item = DayCell<'a>> + '_ {
        self.window.days().map(move |day| DayCell {
            day,
            bookings: self
                .bookings
                .iter()
                .copied()
                .filter(|b| b.occupies(day))
                .collect(),
        })
    }

    /// Number of nights in the window with at least one booking.
    pub fn occupied_nights(&self) -> usize {
        self.days().filter(|cell| !cell.is_free()).count()
    }
}

/// Rooms and their daily occupancy over a window.
#[derive(Debug, Clone)]
pub struct WeekProjection<'a> {
    window: CalendarWindow,
    rows: Vec<RoomRow<'a>>,
}

impl<'a> WeekProjection<'a> {
    pub(crate) fn build(
        rooms: &'a [Room],
        bookings: &'a [Booking],
        window: CalendarWindow,
        options: &CalendarOptions,
    ) -> Self {
        let rows = rooms
            .iter()
            .filter_map(|room| {
                let mut in_window: Vec<&'a Booking> = bookings
                    .iter()
                    .filter(|b| b.room_id == room.id)
                    .filter(|b| options.include_cancelled || b.status != BookingStatus::Cancelled)
                    .filter(|b| b.stay.occupies_any(window.first, window.last))
                    .collect();

                if in_window.is_empty() && !options.show_empty_rooms {
                    return None;
                }
                in_window.sort_by_key(|b| b.check_in());

                Some(RoomRow {
                    room,
                    window,
                    bookings: in_window,
                })
            })
            .collect();

        Self { window, rows }
    }

    /// The projected window.
    pub fn window(&self) -> CalendarWindow {
        self.window
    }

    /// One row per shown room, in catalog order.
    pub fn rows(&self) -> &[RoomRow<'a>] {
        &self.rows
    }

    /// Row for a specific room, if shown.
    pub fn row(&self, room_id: innkeep_core::types::RoomId) -> Option<&RoomRow<'a>> {
        self.rows.iter().find(|r| r.room.id == room_id)
    }

    /// No rows to draw.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
