//! Operating expense records.

pub mod model;

pub use model::{Expense, MAX_EXPENSE_AMOUNT, NewExpense};
