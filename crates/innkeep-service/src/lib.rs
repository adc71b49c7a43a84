//! # innkeep-service
//!
//! Business logic service layer for Innkeep. Each service orchestrates the
//! availability engine and the stores to implement a front-desk use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Engine checks always run
//! before the first store write, so a rejected request leaves no trace.

pub mod booking;
pub mod checklist;
pub mod expense;
pub mod guest;
pub mod inventory;
pub mod room;
pub mod state;

pub use booking::{BookingService, WeekCalendar};
pub use checklist::{ChecklistService, ChecklistTemplate};
pub use expense::{ExpenseService, ExpenseSummary};
pub use guest::GuestService;
pub use inventory::InventoryService;
pub use room::{CreateRoomRequest, RoomQuery, RoomService};
pub use state::ServiceState;
