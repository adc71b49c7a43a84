//! JSON snapshot of the whole data set.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use innkeep_core::error::{AppError, ErrorKind};
use innkeep_core::result::AppResult;
use innkeep_engine::find_conflict;
use innkeep_entity::booking::Booking;
use innkeep_entity::checklist::ChecklistItem;
use innkeep_entity::expense::Expense;
use innkeep_entity::guest::Guest;
use innkeep_entity::inventory::InventoryItem;
use innkeep_entity::room::Room;

/// Everything the in-memory store holds, in its on-disk form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub checklists: Vec<ChecklistItem>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    /// Read a snapshot file. A missing file yields an empty snapshot.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No snapshot found, starting empty");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read snapshot {}: {e}", path.display()),
                    e,
                ));
            }
        };

        let snapshot: Self = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Invalid snapshot {}: {e}", path.display()),
                e,
            )
        })?;

        snapshot.validate().map_err(|e| {
            AppError::validation(format!("Invalid snapshot {}: {}", path.display(), e.message))
        })?;

        debug!(
            path = %path.display(),
            rooms = snapshot.rooms.len(),
            bookings = snapshot.bookings.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Check the invariants the stores enforce on every write.
    ///
    /// Room numbers and guest identification numbers are unique, bookings
    /// reference a known room and hold at least one adult, no two active
    /// bookings of a room overlap, checklists belong to known bookings and
    /// inventory levels never exceed their quantity.
    pub fn validate(&self) -> AppResult<()> {
        let mut numbers = HashSet::new();
        if let Some(room) = self.rooms.iter().find(|r| !numbers.insert(r.number.as_str())) {
            return Err(AppError::validation(format!(
                "room number '{}' is used twice",
                room.number
            )));
        }

        let mut id_nos = HashSet::new();
        if let Some(guest) = self
            .guests
            .iter()
            .find(|g| !id_nos.insert(g.identification_no.as_str()))
        {
            return Err(AppError::validation(format!(
                "identification number '{}' is registered twice",
                guest.identification_no
            )));
        }

        let room_ids: HashSet<_> = self.rooms.iter().map(|r| r.id).collect();
        let mut booking_ids = HashSet::new();
        for (index, booking) in self.bookings.iter().enumerate() {
            if !booking_ids.insert(booking.id) {
                return Err(AppError::validation(format!(
                    "booking {} appears twice",
                    booking.id
                )));
            }
            if !room_ids.contains(&booking.room_id) {
                return Err(AppError::validation(format!(
                    "booking {} references unknown room {}",
                    booking.id, booking.room_id
                )));
            }
            if booking.adults == 0 {
                return Err(AppError::validation(format!(
                    "booking {} has no adults",
                    booking.id
                )));
            }
            if booking.is_active() {
                let earlier = &self.bookings[..index];
                if let Some(other) = find_conflict(earlier, booking.room_id, &booking.stay, None) {
                    return Err(AppError::validation(format!(
                        "bookings {} {} and {} {} overlap",
                        other.id, other.stay, booking.id, booking.stay
                    )));
                }
            }
        }

        if let Some(item) = self
            .checklists
            .iter()
            .find(|i| !booking_ids.contains(&i.booking_id))
        {
            return Err(AppError::validation(format!(
                "checklist item {} references unknown booking {}",
                item.id, item.booking_id
            )));
        }

        if let Some(item) = self.inventory.iter().find(|i| i.current_level > i.quantity) {
            return Err(AppError::validation(format!(
                "'{}' holds {} of {} units",
                item.name, item.current_level, item.quantity
            )));
        }

        if let Some(expense) = self.expenses.iter().find(|e| e.amount < 0) {
            return Err(AppError::validation(format!(
                "expense {} has a negative amount",
                expense.id
            )));
        }

        Ok(())
    }

    /// Write the snapshot as pretty JSON.
    ///
    /// The data is written to a sibling temporary file first and renamed
    /// over the target, so a crash never leaves a truncated snapshot.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;

        debug!(path = %path.display(), "Snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use innkeep_core::types::{GuestId, StayRange};
    use innkeep_entity::booking::{NewBooking, PaymentStatus};
    use innkeep_entity::room::RoomType;

    fn booking(room: &Room, check_in: u32, check_out: u32) -> Booking {
        NewBooking {
            room_id: room.id,
            guest_id: GuestId::new(),
            stay: StayRange::new(
                NaiveDate::from_ymd_opt(2024, 6, check_in).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, check_out).unwrap(),
            )
            .unwrap(),
            adults: 1,
            children: 0,
            total_amount: 100,
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
        .into_booking(Utc::now())
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::load(dir.path().join("absent.json")).await.unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("innkeep.json");

        let snapshot = Snapshot {
            rooms: vec![Room::new("101", RoomType::Suite, 4, 250)],
            ..Default::default()
        };
        snapshot.save(&path).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(err.is(ErrorKind::Serialization));
    }

    #[tokio::test]
    async fn test_partial_document_defaults_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.json");
        tokio::fs::write(&path, br#"{ "rooms": [] }"#).await.unwrap();

        let snapshot = Snapshot::load(&path).await.unwrap();
        assert!(snapshot.bookings.is_empty());
        assert!(snapshot.inventory.is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_level_above_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.json");
        let document = serde_json::json!({
            "inventory": [{
                "id": "7a0e3f0e-8d4c-4a8e-9a55-0f1f2b3c4d5e",
                "name": "Bath towel",
                "category": "linen",
                "quantity": 5,
                "current_level": 50,
                "minimum_level": 1,
                "unit": "piece",
                "last_restocked": "2024-06-01T08:00:00Z"
            }]
        });
        tokio::fs::write(&path, serde_json::to_vec(&document).unwrap())
            .await
            .unwrap();

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert!(err.message.contains("Bath towel"));
    }

    #[tokio::test]
    async fn test_load_rejects_overlapping_active_bookings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("innkeep.json");
        let room = Room::new("101", RoomType::Double, 2, 100);
        let snapshot = Snapshot {
            bookings: vec![booking(&room, 1, 5), booking(&room, 4, 6)],
            rooms: vec![room],
            ..Default::default()
        };
        snapshot.save(&path).await.unwrap();

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_validate_accepts_turnover_and_inactive_overlap() {
        let room = Room::new("101", RoomType::Double, 2, 100);
        let mut cancelled = booking(&room, 2, 4);
        cancelled.status = innkeep_entity::booking::BookingStatus::Cancelled;
        let snapshot = Snapshot {
            bookings: vec![booking(&room, 1, 5), booking(&room, 5, 8), cancelled],
            rooms: vec![room],
            ..Default::default()
        };
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bookings() {
        let room = Room::new("101", RoomType::Double, 2, 100);
        let mut empty_party = booking(&room, 1, 3);
        empty_party.adults = 0;
        let snapshot = Snapshot {
            bookings: vec![empty_party],
            rooms: vec![room.clone()],
            ..Default::default()
        };
        assert!(snapshot.validate().unwrap_err().is(ErrorKind::Validation));

        let orphan = Snapshot {
            bookings: vec![booking(&room, 1, 3)],
            ..Default::default()
        };
        assert!(orphan.validate().unwrap_err().is(ErrorKind::Validation));

        let duplicate_numbers = Snapshot {
            rooms: vec![room.clone(), Room::new("101", RoomType::Single, 1, 50)],
            ..Default::default()
        };
        assert!(duplicate_numbers.validate().is_err());
    }
}
