//! # innkeep-entity
//!
//! Domain entity models for Innkeep. Every struct in this crate represents
//! a stored record or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize`; request payloads additionally
//! derive `validator::Validate`.

pub mod booking;
pub mod checklist;
pub mod expense;
pub mod guest;
pub mod inventory;
pub mod room;
