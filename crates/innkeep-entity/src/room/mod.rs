//! Room domain entities.

pub mod model;
pub mod status;

pub use model::{MAX_PRICE_PER_NIGHT, Room};
pub use status::{RoomStatus, RoomType};
