//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use innkeep_core::config::AppConfig;
use innkeep_entity::booking::{Booking, CreateBookingRequest};
use innkeep_entity::guest::{Guest, NewGuest};
use innkeep_entity::room::{Room, RoomType};
use innkeep_service::{CreateRoomRequest, ServiceState};
use innkeep_store::{MemoryStore, Snapshot};

/// Test application context
pub struct TestApp {
    /// Wired services
    pub state: ServiceState,
    /// Snapshot file inside `_dir`
    pub snapshot_path: PathBuf,
    /// Keeps the temporary directory alive
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let snapshot_path = dir.path().join("innkeep.json");
        let state = ServiceState::new(Self::config(&snapshot_path), MemoryStore::new())
            .expect("Failed to wire services");

        Self {
            state,
            snapshot_path,
            _dir: dir,
        }
    }

    fn config(snapshot_path: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data.snapshot_path = snapshot_path.display().to_string();
        config
    }

    /// Write the store to the snapshot file
    pub async fn save(&self) {
        self.state
            .store
            .snapshot()
            .await
            .save(&self.snapshot_path)
            .await
            .expect("Failed to save snapshot");
    }

    /// Build a second application from the snapshot file, as a new CLI run would
    pub async fn reopen(&self) -> ServiceState {
        let snapshot = Snapshot::load(&self.snapshot_path)
            .await
            .expect("Failed to load snapshot");
        ServiceState::new(
            Self::config(&self.snapshot_path),
            MemoryStore::from_snapshot(snapshot).expect("Snapshot failed validation"),
        )
        .expect("Failed to wire services")
    }

    /// Add a room to the catalog
    pub async fn create_room(&self, number: &str, capacity: u32, price: i64) -> Room {
        self.state
            .rooms
            .create(CreateRoomRequest {
                number: number.to_string(),
                room_type: RoomType::Double,
                capacity,
                price_per_night: price,
                amenities: Vec::new(),
                description: None,
            })
            .await
            .expect("Failed to create room")
    }

    /// Register a guest
    pub async fn create_guest(&self, first: &str, last: &str) -> Guest {
        self.state
            .guests
            .register(NewGuest {
                first_name: first.to_string(),
                last_name: last.to_string(),
                identification_no: format!("ID-{first}-{last}"),
                ..Default::default()
            })
            .await
            .expect("Failed to register guest")
    }

    /// Build a booking request for one adult
    pub fn request(room: &Room, guest: &Guest, check_in: &str, check_out: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            room_id: room.id,
            guest_id: guest.id,
            check_in_date: date(check_in),
            check_out_date: date(check_out),
            adults: 1,
            children: 0,
            payment_status: None,
            notes: None,
        }
    }

    /// Book a room, panicking on rejection
    pub async fn book(&self, room: &Room, guest: &Guest, check_in: &str, check_out: &str) -> Booking {
        self.state
            .bookings
            .create_booking(Self::request(room, guest, check_in, check_out))
            .await
            .expect("Booking rejected")
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("Invalid date")
}
