//! In-memory store for single-process deployments.
//!
//! Bookings live behind one Tokio `RwLock` so the overlap check and the
//! write happen atomically. Everything else sits in `DashMap`s keyed by id.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use innkeep_core::error::AppError;
use innkeep_core::result::AppResult;
use innkeep_core::types::{
    BookingId, ChecklistItemId, ExpenseId, GuestId, InventoryItemId, RoomId, StayRange,
};
use innkeep_engine::{BookingError, ensure_transition, find_conflict};
use innkeep_entity::booking::{Booking, BookingFilter, BookingStatus, NewBooking};
use innkeep_entity::checklist::ChecklistItem;
use innkeep_entity::expense::Expense;
use innkeep_entity::guest::Guest;
use innkeep_entity::inventory::InventoryItem;
use innkeep_entity::room::{Room, RoomStatus};

use crate::snapshot::Snapshot;
use crate::traits::{
    BookingStore, ChecklistStore, ExpenseStore, GuestRegistry, InventoryStore, RoomCatalog,
};

/// In-memory implementation of every store trait.
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
    rooms: Arc<DashMap<RoomId, Room>>,
    guests: Arc<DashMap<GuestId, Guest>>,
    checklists: Arc<DashMap<BookingId, Vec<ChecklistItem>>>,
    inventory: Arc<DashMap<InventoryItemId, InventoryItem>>,
    expenses: Arc<DashMap<ExpenseId, Expense>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the contents of `snapshot`.
    ///
    /// Fails with a validation error when the snapshot breaks an invariant
    /// the store would have refused on write.
    pub fn from_snapshot(snapshot: Snapshot) -> AppResult<Self> {
        snapshot.validate()?;

        let store = Self {
            bookings: Arc::new(RwLock::new(snapshot.bookings)),
            ..Self::default()
        };

        for room in snapshot.rooms {
            store.rooms.insert(room.id, room);
        }
        for guest in snapshot.guests {
            store.guests.insert(guest.id, guest);
        }
        for item in snapshot.checklists {
            store.checklists.entry(item.booking_id).or_default().push(item);
        }
        for item in snapshot.inventory {
            store.inventory.insert(item.id, item);
        }
        for expense in snapshot.expenses {
            store.expenses.insert(expense.id, expense);
        }

        Ok(store)
    }

    /// Copies the current contents out, in a stable order.
    pub async fn snapshot(&self) -> Snapshot {
        let bookings = self.bookings.read().await.clone();

        let mut checklists: Vec<ChecklistItem> = Vec::new();
        for booking in &bookings {
            if let Some(items) = self.checklists.get(&booking.id) {
                checklists.extend(items.iter().cloned());
            }
        }

        Snapshot {
            rooms: sorted_rooms(&self.rooms),
            guests: sorted_guests(&self.guests),
            bookings,
            checklists,
            inventory: sorted_inventory(&self.inventory),
            expenses: sorted_expenses(&self.expenses),
        }
    }
}

fn sorted_rooms(rooms: &DashMap<RoomId, Room>) -> Vec<Room> {
    let mut out: Vec<Room> = rooms.iter().map(|r| r.value().clone()).collect();
    out.sort_by(|a, b| a.number.cmp(&b.number));
    out
}

fn sorted_guests(guests: &DashMap<GuestId, Guest>) -> Vec<Guest> {
    let mut out: Vec<Guest> = guests.iter().map(|g| g.value().clone()).collect();
    out.sort_by(|a, b| {
        (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
    });
    out
}

fn sorted_inventory(items: &DashMap<InventoryItemId, InventoryItem>) -> Vec<InventoryItem> {
    let mut out: Vec<InventoryItem> = items.iter().map(|i| i.value().clone()).collect();
    out.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
    out
}

fn sorted_expenses(expenses: &DashMap<ExpenseId, Expense>) -> Vec<Expense> {
    let mut out: Vec<Expense> = expenses.iter().map(|e| e.value().clone()).collect();
    out.sort_by(|a, b| {
        (a.date_incurred, &a.description).cmp(&(b.date_incurred, &b.description))
    });
    out
}

fn booking_not_found(id: BookingId) -> AppError {
    AppError::not_found(format!("Booking {id} not found"))
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn get_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn create_booking(&self, new: NewBooking) -> AppResult<Booking> {
        let mut bookings = self.bookings.write().await;

        if !self.rooms.contains_key(&new.room_id) {
            return Err(BookingError::RoomNotFound(new.room_id).into());
        }

        if let Some(existing) = find_conflict(bookings.iter(), new.room_id, &new.stay, None) {
            warn!(
                room_id = %new.room_id,
                stay = %new.stay,
                conflicting = %existing.id,
                "Rejected booking: room already held"
            );
            return Err(BookingError::BookingConflict {
                conflicting: existing.id,
                stay: existing.stay,
            }
            .into());
        }

        let booking = new.into_booking(Utc::now());
        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            stay = %booking.stay,
            "Booking stored"
        );
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, id: BookingId, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| booking_not_found(id))?;

        ensure_transition(booking.status, status)?;

        let from = booking.status;
        booking.status = status;
        booking.updated_at = Utc::now();
        info!(booking_id = %id, from = %from, to = %status, "Booking status changed");
        Ok(booking.clone())
    }

    async fn update_checkout(
        &self,
        id: BookingId,
        check_out: NaiveDate,
        total_amount: i64,
    ) -> AppResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| booking_not_found(id))?;

        let current = &bookings[index];
        let stay = StayRange::new(current.check_in(), check_out).ok_or(
            BookingError::InvalidDateRange {
                check_in: current.check_in(),
                check_out,
            },
        )?;

        if current.is_active() {
            if let Some(existing) = find_conflict(bookings.iter(), current.room_id, &stay, Some(id)) {
                warn!(
                    booking_id = %id,
                    stay = %stay,
                    conflicting = %existing.id,
                    "Rejected check-out change: room already held"
                );
                return Err(BookingError::ExtensionConflict {
                    conflicting: existing.id,
                    stay: existing.stay,
                }
                .into());
            }
        }

        let booking = &mut bookings[index];
        booking.stay = stay;
        booking.total_amount = total_amount;
        booking.updated_at = Utc::now();
        info!(booking_id = %id, check_out = %check_out, total_amount, "Booking check-out moved");
        Ok(booking.clone())
    }

    async fn delete_booking(&self, id: BookingId) -> AppResult<()> {
        let mut bookings = self.bookings.write().await;
        let index = bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| booking_not_found(id))?;

        bookings.remove(index);
        self.checklists.remove(&id);
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }
}

#[async_trait]
impl RoomCatalog for MemoryStore {
    async fn get_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.value().clone()))
    }

    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        Ok(sorted_rooms(&self.rooms))
    }

    async fn upsert_room(&self, room: Room) -> AppResult<Room> {
        let number_taken = self
            .rooms
            .iter()
            .any(|r| r.number == room.number && r.id != room.id);
        if number_taken {
            return Err(AppError::conflict(format!(
                "Room number '{}' is already in use",
                room.number
            )));
        }

        info!(room_id = %room.id, number = %room.number, "Room saved");
        self.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn set_room_status(&self, id: RoomId, status: RoomStatus) -> AppResult<Room> {
        let mut room = self
            .rooms
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Room {id} not found")))?;

        room.status = status;
        info!(room_id = %id, number = %room.number, status = %status, "Room status changed");
        Ok(room.clone())
    }
}

#[async_trait]
impl GuestRegistry for MemoryStore {
    async fn get_guest(&self, id: GuestId) -> AppResult<Option<Guest>> {
        Ok(self.guests.get(&id).map(|g| g.value().clone()))
    }

    async fn list_guests(&self) -> AppResult<Vec<Guest>> {
        Ok(sorted_guests(&self.guests))
    }

    async fn create_guest(&self, guest: Guest) -> AppResult<Guest> {
        let duplicate = self.guests.iter().any(|g| {
            g.id == guest.id || g.identification_no == guest.identification_no
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "A guest with identification number '{}' is already registered",
                guest.identification_no
            )));
        }

        info!(guest_id = %guest.id, "Guest registered");
        self.guests.insert(guest.id, guest.clone());
        Ok(guest)
    }

    async fn update_guest(&self, guest: Guest) -> AppResult<Guest> {
        if !self.guests.contains_key(&guest.id) {
            return Err(AppError::not_found(format!("Guest {} not found", guest.id)));
        }

        let taken = self.guests.iter().any(|g| {
            g.id != guest.id && g.identification_no == guest.identification_no
        });
        if taken {
            return Err(AppError::conflict(format!(
                "A guest with identification number '{}' is already registered",
                guest.identification_no
            )));
        }

        info!(guest_id = %guest.id, "Guest updated");
        self.guests.insert(guest.id, guest.clone());
        Ok(guest)
    }

    async fn delete_guest(&self, id: GuestId) -> AppResult<()> {
        if self.guests.remove(&id).is_none() {
            return Err(AppError::not_found(format!("Guest {id} not found")));
        }
        info!(guest_id = %id, "Guest deleted");
        Ok(())
    }
}

#[async_trait]
impl ChecklistStore for MemoryStore {
    async fn get_by_booking(&self, booking_id: BookingId) -> AppResult<Vec<ChecklistItem>> {
        Ok(self
            .checklists
            .get(&booking_id)
            .map(|items| items.value().clone())
            .unwrap_or_default())
    }

    async fn save(
        &self,
        booking_id: BookingId,
        items: Vec<ChecklistItem>,
    ) -> AppResult<Vec<ChecklistItem>> {
        if let Some(stray) = items.iter().find(|i| i.booking_id != booking_id) {
            return Err(AppError::validation(format!(
                "Checklist item {} belongs to booking {}, not {booking_id}",
                stray.id, stray.booking_id
            )));
        }

        info!(booking_id = %booking_id, items = items.len(), "Checklist saved");
        self.checklists.insert(booking_id, items.clone());
        Ok(items)
    }

    async fn get_item(&self, id: ChecklistItemId) -> AppResult<Option<ChecklistItem>> {
        Ok(self
            .checklists
            .iter()
            .find_map(|entry| entry.value().iter().find(|i| i.id == id).cloned()))
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(sorted_inventory(&self.inventory))
    }

    async fn find_item(&self, id: InventoryItemId) -> AppResult<Option<InventoryItem>> {
        Ok(self.inventory.get(&id).map(|i| i.value().clone()))
    }

    async fn save_item(&self, item: InventoryItem) -> AppResult<InventoryItem> {
        if item.current_level > item.quantity {
            return Err(AppError::validation(format!(
                "Current level {} cannot exceed total quantity {} for '{}'",
                item.current_level, item.quantity, item.name
            )));
        }

        self.inventory.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete_item(&self, id: InventoryItemId) -> AppResult<()> {
        if self.inventory.remove(&id).is_none() {
            return Err(AppError::not_found(format!("Inventory item {id} not found")));
        }
        info!(item_id = %id, "Inventory item deleted");
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn list_expenses(&self) -> AppResult<Vec<Expense>> {
        Ok(sorted_expenses(&self.expenses))
    }

    async fn get_expense(&self, id: ExpenseId) -> AppResult<Option<Expense>> {
        Ok(self.expenses.get(&id).map(|e| e.value().clone()))
    }

    async fn save_expense(&self, expense: Expense) -> AppResult<Expense> {
        if expense.amount < 0 {
            return Err(AppError::validation(format!(
                "Expense amount cannot be negative (got {})",
                expense.amount
            )));
        }

        info!(expense_id = %expense.id, amount = expense.amount, "Expense saved");
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn delete_expense(&self, id: ExpenseId) -> AppResult<()> {
        if self.expenses.remove(&id).is_none() {
            return Err(AppError::not_found(format!("Expense {id} not found")));
        }
        info!(expense_id = %id, "Expense deleted");
        Ok(())
    }
}
