//! Room catalog management.

pub mod service;

pub use service::{CreateRoomRequest, RoomQuery, RoomService};
