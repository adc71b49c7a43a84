//! # innkeep-store
//!
//! Persistence contracts for Innkeep and their in-memory implementation.
//!
//! Services only ever see the traits in [`traits`]. [`MemoryStore`]
//! implements all of them for a single process and can be loaded from and
//! written back to a JSON [`Snapshot`].

pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::MemoryStore;
pub use snapshot::Snapshot;
pub use traits::{
    BookingStore, ChecklistStore, ExpenseStore, GuestRegistry, InventoryStore, RoomCatalog,
};
