//! Checklist viewing, editing and progress.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use innkeep_core::error::AppError;
use innkeep_core::types::{BookingId, ChecklistItemId};
use innkeep_entity::booking::{Booking, BookingStatus};
use innkeep_entity::checklist::{
    ChecklistCategory, ChecklistItem, ChecklistProgress, group_by_category,
};
use innkeep_store::{BookingStore, ChecklistStore};

use super::template::ChecklistTemplate;

/// Manages the checklist attached to each booking.
#[derive(Debug, Clone)]
pub struct ChecklistService {
    /// Checklist store.
    checklists: Arc<dyn ChecklistStore>,
    /// Booking store, to make sure the booking exists.
    bookings: Arc<dyn BookingStore>,
    /// Template used by [`reset`](Self::reset).
    template: ChecklistTemplate,
}

impl ChecklistService {
    /// Creates a new checklist service.
    pub fn new(
        checklists: Arc<dyn ChecklistStore>,
        bookings: Arc<dyn BookingStore>,
        template: ChecklistTemplate,
    ) -> Self {
        Self {
            checklists,
            bookings,
            template,
        }
    }

    async fn require_booking(&self, booking_id: BookingId) -> Result<Booking, AppError> {
        self.bookings
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }

    /// A checklist exists only once the guest has checked in; checked-out
    /// stays keep theirs for housekeeping.
    async fn require_checked_in(&self, booking_id: BookingId) -> Result<Booking, AppError> {
        let booking = self.require_booking(booking_id).await?;
        match booking.status {
            BookingStatus::CheckedIn | BookingStatus::CheckedOut => Ok(booking),
            status => Err(AppError::conflict(format!(
                "Booking {booking_id} is {status}; checklists start at check-in"
            ))),
        }
    }

    /// Items of a booking's checklist.
    pub async fn get(&self, booking_id: BookingId) -> Result<Vec<ChecklistItem>, AppError> {
        self.require_booking(booking_id).await?;
        self.checklists.get_by_booking(booking_id).await
    }

    /// Items grouped by category, categories in display order.
    pub async fn grouped(
        &self,
        booking_id: BookingId,
    ) -> Result<BTreeMap<ChecklistCategory, Vec<ChecklistItem>>, AppError> {
        let items = self.get(booking_id).await?;
        Ok(group_by_category(&items)
            .into_iter()
            .map(|(category, items)| (category, items.into_iter().cloned().collect()))
            .collect())
    }

    /// Replace the whole checklist.
    pub async fn save(
        &self,
        booking_id: BookingId,
        items: Vec<ChecklistItem>,
    ) -> Result<Vec<ChecklistItem>, AppError> {
        self.require_checked_in(booking_id).await?;
        if let Some(blank) = items.iter().find(|i| i.item.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "Checklist item {} has no text",
                blank.id
            )));
        }
        self.checklists.save(booking_id, items).await
    }

    /// Flip one item between done and not done.
    pub async fn toggle(&self, item_id: ChecklistItemId) -> Result<ChecklistItem, AppError> {
        let item = self
            .checklists
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Checklist item {item_id} not found")))?;
        self.require_checked_in(item.booking_id).await?;

        let mut items = self.checklists.get_by_booking(item.booking_id).await?;
        let mut toggled = None;
        for entry in items.iter_mut().filter(|i| i.id == item_id) {
            entry.toggle();
            toggled = Some(entry.clone());
        }
        let toggled = toggled
            .ok_or_else(|| AppError::not_found(format!("Checklist item {item_id} not found")))?;

        self.checklists.save(item.booking_id, items).await?;
        info!(
            booking_id = %item.booking_id,
            item_id = %item_id,
            completed = toggled.completed,
            "Checklist item toggled"
        );
        Ok(toggled)
    }

    /// Completed versus total items.
    pub async fn progress(&self, booking_id: BookingId) -> Result<ChecklistProgress, AppError> {
        let items = self.get(booking_id).await?;
        Ok(ChecklistProgress::of(&items))
    }

    /// Throw the current checklist away and start again from the template.
    pub async fn reset(&self, booking_id: BookingId) -> Result<Vec<ChecklistItem>, AppError> {
        self.require_checked_in(booking_id).await?;
        let items = self.template.instantiate(booking_id);
        info!(booking_id = %booking_id, items = items.len(), "Checklist reset");
        self.checklists.save(booking_id, items).await
    }
}
