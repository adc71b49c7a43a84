//! Collaborator traits consumed by the service layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use innkeep_core::result::AppResult;
use innkeep_core::types::{
    BookingId, ChecklistItemId, ExpenseId, GuestId, InventoryItemId, RoomId,
};
use innkeep_entity::booking::{Booking, BookingFilter, BookingStatus, NewBooking};
use innkeep_entity::checklist::ChecklistItem;
use innkeep_entity::expense::Expense;
use innkeep_entity::guest::Guest;
use innkeep_entity::inventory::InventoryItem;
use innkeep_entity::room::{Room, RoomStatus};

/// Source of truth for bookings.
///
/// Implementations must be thread-safe. `create_booking` and
/// `update_checkout` re-check overlaps atomically with the write, so a
/// request the engine accepted can still be rejected here with a
/// `Conflict` error.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug {
    /// Bookings matching `filter`, in creation order.
    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>>;

    /// Fetch one booking.
    async fn get_booking(&self, id: BookingId) -> AppResult<Option<Booking>>;

    /// Persist a new `confirmed` booking.
    async fn create_booking(&self, new: NewBooking) -> AppResult<Booking>;

    /// Move a booking to `status`, rejecting transitions outside the lifecycle.
    async fn update_status(&self, id: BookingId, status: BookingStatus) -> AppResult<Booking>;

    /// Move the departure day and replace the total amount.
    async fn update_checkout(
        &self,
        id: BookingId,
        check_out: NaiveDate,
        total_amount: i64,
    ) -> AppResult<Booking>;

    /// Remove a booking.
    async fn delete_booking(&self, id: BookingId) -> AppResult<()>;
}

/// The room catalog.
#[async_trait]
pub trait RoomCatalog: Send + Sync + std::fmt::Debug {
    /// Fetch one room.
    async fn get_room(&self, id: RoomId) -> AppResult<Option<Room>>;

    /// All rooms, ordered by room number.
    async fn list_rooms(&self) -> AppResult<Vec<Room>>;

    /// Insert or replace a room. Room numbers are unique.
    async fn upsert_room(&self, room: Room) -> AppResult<Room>;

    /// Change the informational status of a room.
    async fn set_room_status(&self, id: RoomId, status: RoomStatus) -> AppResult<Room>;
}

/// The guest registry.
#[async_trait]
pub trait GuestRegistry: Send + Sync + std::fmt::Debug {
    /// Fetch one guest.
    async fn get_guest(&self, id: GuestId) -> AppResult<Option<Guest>>;

    /// All guests, ordered by last then first name.
    async fn list_guests(&self) -> AppResult<Vec<Guest>>;

    /// Register a guest. Identification numbers are unique.
    async fn create_guest(&self, guest: Guest) -> AppResult<Guest>;

    /// Replace an existing guest record, keeping identification numbers
    /// unique.
    async fn update_guest(&self, guest: Guest) -> AppResult<Guest>;

    /// Remove a guest record.
    async fn delete_guest(&self, id: GuestId) -> AppResult<()>;
}

/// Per-booking checklists.
#[async_trait]
pub trait ChecklistStore: Send + Sync + std::fmt::Debug {
    /// The checklist of a booking; empty when none was created.
    async fn get_by_booking(&self, booking_id: BookingId) -> AppResult<Vec<ChecklistItem>>;

    /// Replace the whole checklist of a booking.
    async fn save(
        &self,
        booking_id: BookingId,
        items: Vec<ChecklistItem>,
    ) -> AppResult<Vec<ChecklistItem>>;

    /// Fetch one item.
    async fn get_item(&self, id: ChecklistItemId) -> AppResult<Option<ChecklistItem>>;
}

/// Supply inventory.
#[async_trait]
pub trait InventoryStore: Send + Sync + std::fmt::Debug {
    /// All items, ordered by category then name.
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>>;

    /// Fetch one item.
    async fn find_item(&self, id: InventoryItemId) -> AppResult<Option<InventoryItem>>;

    /// Insert or replace an item.
    async fn save_item(&self, item: InventoryItem) -> AppResult<InventoryItem>;

    /// Remove an item.
    async fn delete_item(&self, id: InventoryItemId) -> AppResult<()>;
}

/// Operating expense ledger.
#[async_trait]
pub trait ExpenseStore: Send + Sync + std::fmt::Debug {
    /// All expenses, oldest first.
    async fn list_expenses(&self) -> AppResult<Vec<Expense>>;

    /// Fetch one expense.
    async fn get_expense(&self, id: ExpenseId) -> AppResult<Option<Expense>>;

    /// Insert or replace an expense.
    async fn save_expense(&self, expense: Expense) -> AppResult<Expense>;

    /// Remove an expense.
    async fn delete_expense(&self, id: ExpenseId) -> AppResult<()>;
}
