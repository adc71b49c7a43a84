//! Booking creation, status changes, extensions and calendar views.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use validator::Validate;

use innkeep_core::error::AppError;
use innkeep_core::types::{BookingId, RoomId};
use innkeep_engine::{
    AvailabilityEngine, AvailabilityQuote, BookingError, CalendarOptions, CalendarWindow,
    StayRequest, ensure_transition,
};
use innkeep_entity::booking::{
    Booking, BookingFilter, BookingStatus, CreateBookingRequest, NewBooking,
};
use innkeep_entity::room::{Room, RoomStatus};
use innkeep_store::{BookingStore, ChecklistStore, GuestRegistry, RoomCatalog};

use super::calendar::WeekCalendar;
use crate::checklist::ChecklistTemplate;

/// Front-desk booking operations.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Booking store.
    bookings: Arc<dyn BookingStore>,
    /// Room catalog.
    rooms: Arc<dyn RoomCatalog>,
    /// Guest registry.
    guests: Arc<dyn GuestRegistry>,
    /// Checklist store, filled at check-in.
    checklists: Arc<dyn ChecklistStore>,
    /// Checklist created for each check-in.
    template: ChecklistTemplate,
    /// Default calendar options.
    calendar: CalendarOptions,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        rooms: Arc<dyn RoomCatalog>,
        guests: Arc<dyn GuestRegistry>,
        checklists: Arc<dyn ChecklistStore>,
        template: ChecklistTemplate,
        calendar: CalendarOptions,
    ) -> Self {
        Self {
            bookings,
            rooms,
            guests,
            checklists,
            template,
            calendar,
        }
    }

    /// Calendar options used by [`week_calendar`](Self::week_calendar).
    pub fn calendar_options(&self) -> &CalendarOptions {
        &self.calendar
    }

    /// Rooms plus the bookings of one room, the snapshot the engine needs
    /// for single-room checks.
    async fn room_snapshot(&self, room_id: RoomId) -> Result<(Vec<Room>, Vec<Booking>), AppError> {
        let rooms = self.rooms.list_rooms().await?;
        let bookings = self
            .bookings
            .list_bookings(&BookingFilter::for_room(room_id))
            .await?;
        Ok((rooms, bookings))
    }

    /// Gets a booking by ID.
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, AppError> {
        self.bookings
            .get_booking(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))
    }

    /// Lists bookings matching `filter`.
    pub async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        self.bookings.list_bookings(filter).await
    }

    /// Confirmed bookings arriving on `today`.
    pub async fn arrivals(&self, today: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let filter = BookingFilter {
            check_in_on: Some(today),
            ..BookingFilter::all()
        }
        .with_status(BookingStatus::Confirmed);
        self.bookings.list_bookings(&filter).await
    }

    /// Checked-in bookings leaving on `today`.
    pub async fn departures(&self, today: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let filter = BookingFilter {
            check_out_on: Some(today),
            ..BookingFilter::all()
        }
        .with_status(BookingStatus::CheckedIn);
        self.bookings.list_bookings(&filter).await
    }

    /// Runs the availability check without booking anything.
    pub async fn check_availability(
        &self,
        request: &StayRequest,
    ) -> Result<AvailabilityQuote, AppError> {
        let (rooms, bookings) = self.room_snapshot(request.room_id).await?;
        let quote = AvailabilityEngine::new(&rooms, &bookings).check_availability(request)?;
        Ok(quote)
    }

    /// Books a room.
    ///
    /// The engine check runs against the current snapshot first; the store
    /// then repeats the overlap check atomically and may still reject the
    /// booking if another one slipped in meanwhile.
    pub async fn create_booking(&self, req: CreateBookingRequest) -> Result<Booking, AppError> {
        req.validate()?;

        self.guests
            .get_guest(req.guest_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {} not found", req.guest_id)))?;

        let quote = self
            .check_availability(&StayRequest {
                room_id: req.room_id,
                check_in: req.check_in_date,
                check_out: req.check_out_date,
                adults: req.adults,
                children: req.children,
            })
            .await?;

        let booking = self
            .bookings
            .create_booking(NewBooking {
                room_id: req.room_id,
                guest_id: req.guest_id,
                stay: quote.stay,
                adults: req.adults,
                children: req.children,
                total_amount: quote.total_amount,
                payment_status: req.payment_status.unwrap_or_default(),
                notes: req.notes,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            guest_id = %booking.guest_id,
            stay = %booking.stay,
            total_amount = booking.total_amount,
            "Booking created"
        );
        Ok(booking)
    }

    /// Checks the guest in: the room becomes occupied and the booking's
    /// checklist is created from the template.
    ///
    /// Room and checklist are written before the status; when the status
    /// change fails they are put back as they were.
    pub async fn check_in(&self, id: BookingId) -> Result<Booking, AppError> {
        let booking = self.get_booking(id).await?;
        ensure_transition(booking.status, BookingStatus::CheckedIn)?;
        let room = self.require_room(booking.room_id).await?;

        let created_checklist = self.checklists.get_by_booking(id).await?.is_empty();
        if created_checklist {
            self.checklists
                .save(id, self.template.instantiate(id))
                .await?;
        }

        if let Err(err) = self
            .rooms
            .set_room_status(room.id, RoomStatus::Occupied)
            .await
        {
            self.discard_checklist(id, created_checklist).await;
            return Err(err);
        }

        let updated = match self.bookings.update_status(id, BookingStatus::CheckedIn).await {
            Ok(updated) => updated,
            Err(err) => {
                self.restore_room_status(&room).await;
                self.discard_checklist(id, created_checklist).await;
                return Err(err);
            }
        };

        info!(booking_id = %id, room_id = %updated.room_id, "Guest checked in");
        Ok(updated)
    }

    /// Checks the guest out and releases the room.
    pub async fn check_out(&self, id: BookingId) -> Result<Booking, AppError> {
        let booking = self.get_booking(id).await?;
        ensure_transition(booking.status, BookingStatus::CheckedOut)?;
        let room = self.require_room(booking.room_id).await?;

        self.rooms
            .set_room_status(room.id, RoomStatus::Available)
            .await?;

        let updated = match self.bookings.update_status(id, BookingStatus::CheckedOut).await {
            Ok(updated) => updated,
            Err(err) => {
                self.restore_room_status(&room).await;
                return Err(err);
            }
        };

        info!(booking_id = %id, room_id = %updated.room_id, "Guest checked out");
        Ok(updated)
    }

    async fn require_room(&self, room_id: RoomId) -> Result<Room, AppError> {
        self.rooms
            .get_room(room_id)
            .await?
            .ok_or_else(|| BookingError::RoomNotFound(room_id).into())
    }

    async fn restore_room_status(&self, room: &Room) {
        if let Err(err) = self.rooms.set_room_status(room.id, room.status).await {
            warn!(room_id = %room.id, error = %err, "Failed to restore room status");
        }
    }

    async fn discard_checklist(&self, booking_id: BookingId, created: bool) {
        if !created {
            return;
        }
        if let Err(err) = self.checklists.save(booking_id, Vec::new()).await {
            warn!(booking_id = %booking_id, error = %err, "Failed to discard checklist");
        }
    }

    /// Cancels a confirmed booking.
    pub async fn cancel(&self, id: BookingId) -> Result<Booking, AppError> {
        let booking = self.get_booking(id).await?;
        ensure_transition(booking.status, BookingStatus::Cancelled)?;

        let updated = self.bookings.update_status(id, BookingStatus::Cancelled).await?;
        self.release_room_if_idle(updated.room_id).await?;

        info!(booking_id = %id, "Booking cancelled");
        Ok(updated)
    }

    /// Marks an occupied room available again when nobody is checked in.
    async fn release_room_if_idle(&self, room_id: RoomId) -> Result<(), AppError> {
        let Some(room) = self.rooms.get_room(room_id).await? else {
            return Ok(());
        };
        if room.status != RoomStatus::Occupied {
            return Ok(());
        }

        let in_house = self
            .bookings
            .list_bookings(&BookingFilter::for_room(room_id).with_status(BookingStatus::CheckedIn))
            .await?;
        if in_house.is_empty() {
            self.rooms
                .set_room_status(room_id, RoomStatus::Available)
                .await?;
        } else {
            debug!(room_id = %room_id, "Room still has a checked-in booking");
        }
        Ok(())
    }

    /// Extends a stay by `additional_days` nights.
    ///
    /// The stored booking is only touched once the extension passed the
    /// engine check.
    pub async fn extend(&self, id: BookingId, additional_days: u32) -> Result<Booking, AppError> {
        let booking = self.get_booking(id).await?;
        let (rooms, bookings) = self.room_snapshot(booking.room_id).await?;
        let extended =
            AvailabilityEngine::new(&rooms, &bookings).extend_booking(&booking, additional_days)?;

        let stored = self
            .bookings
            .update_checkout(id, extended.check_out(), extended.total_amount)
            .await?;

        info!(
            booking_id = %id,
            additional_days,
            check_out = %stored.check_out(),
            total_amount = stored.total_amount,
            "Stay extended"
        );
        Ok(stored)
    }

    /// Extends a stay so that it ends on `new_check_out`.
    pub async fn extend_to(
        &self,
        id: BookingId,
        new_check_out: NaiveDate,
    ) -> Result<Booking, AppError> {
        let booking = self.get_booking(id).await?;
        let days = (new_check_out - booking.check_out()).num_days();
        let additional_days = u32::try_from(days)
            .ok()
            .filter(|d| *d > 0)
            .ok_or(BookingError::InvalidExtension { additional_days: 0 })?;

        self.extend(id, additional_days).await
    }

    /// Removes a booking and its checklist.
    pub async fn delete_booking(&self, id: BookingId) -> Result<(), AppError> {
        let booking = self.get_booking(id).await?;
        if booking.status == BookingStatus::CheckedIn {
            return Err(AppError::conflict(format!(
                "Booking {id} is checked in; check the guest out first"
            )));
        }
        self.bookings.delete_booking(id).await
    }

    /// The week containing `date`, with the default options.
    pub async fn week_calendar(&self, date: NaiveDate) -> Result<WeekCalendar, AppError> {
        self.week_calendar_with(date, &self.calendar).await
    }

    /// The week containing `date`.
    pub async fn week_calendar_with(
        &self,
        date: NaiveDate,
        options: &CalendarOptions,
    ) -> Result<WeekCalendar, AppError> {
        let rooms = self.rooms.list_rooms().await?;
        let bookings = self.bookings.list_bookings(&BookingFilter::all()).await?;

        let window = CalendarWindow::week_containing(date, options.week_starts_on);
        let projection = AvailabilityEngine::new(&rooms, &bookings).project_week(window, options);
        Ok(WeekCalendar::from(&projection))
    }
}
