//! Operating expense ledger.

pub mod service;

pub use service::{ExpenseService, ExpenseSummary};
