//! Guest registration and lookup.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use innkeep_core::error::AppError;
use innkeep_core::types::GuestId;
use innkeep_entity::booking::BookingFilter;
use innkeep_entity::guest::{Guest, NewGuest};
use innkeep_store::{BookingStore, GuestRegistry};

/// Manages guest records.
#[derive(Debug, Clone)]
pub struct GuestService {
    guests: Arc<dyn GuestRegistry>,
    /// Booking store, consulted before a guest is removed.
    bookings: Arc<dyn BookingStore>,
}

impl GuestService {
    /// Creates a new guest service.
    pub fn new(guests: Arc<dyn GuestRegistry>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { guests, bookings }
    }

    /// Registers a guest after validating the form.
    pub async fn register(&self, req: NewGuest) -> Result<Guest, AppError> {
        req.validate()?;
        let guest = self.guests.create_guest(req.into_guest()).await?;
        info!(guest_id = %guest.id, name = %guest.display_name(), "Guest registered");
        Ok(guest)
    }

    /// Gets a guest by ID.
    pub async fn get(&self, id: GuestId) -> Result<Guest, AppError> {
        self.guests
            .get_guest(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))
    }

    /// Replaces every field of guest `id` with the validated form.
    pub async fn update(&self, id: GuestId, req: NewGuest) -> Result<Guest, AppError> {
        req.validate()?;
        let guest = self.guests.update_guest(req.into_guest_with_id(id)).await?;
        info!(guest_id = %id, name = %guest.display_name(), "Guest updated");
        Ok(guest)
    }

    /// Removes a guest. Refused while the guest holds a confirmed or
    /// checked-in booking.
    pub async fn delete(&self, id: GuestId) -> Result<(), AppError> {
        let guest = self.get(id).await?;
        let filter = BookingFilter {
            guest_id: Some(id),
            ..BookingFilter::all()
        }
        .active();
        let active = self.bookings.list_bookings(&filter).await?;
        if !active.is_empty() {
            return Err(AppError::conflict(format!(
                "{} still holds {} active booking(s)",
                guest.display_name(),
                active.len()
            )));
        }

        self.guests.delete_guest(id).await?;
        info!(guest_id = %id, "Guest deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Guest>, AppError> {
        self.guests.list_guests().await
    }

    /// Guests whose first, middle or last name contains `query`,
    /// ignoring case.
    pub async fn search(&self, query: &str) -> Result<Vec<Guest>, AppError> {
        let query = query.trim();
        let guests = self.guests.list_guests().await?;
        if query.is_empty() {
            return Ok(guests);
        }
        Ok(guests.into_iter().filter(|g| g.matches_name(query)).collect())
    }
}
