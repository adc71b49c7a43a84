//! Expense entity model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use innkeep_core::types::ExpenseId;

/// Largest single expense the ledger accepts, in whole currency units.
pub const MAX_EXPENSE_AMOUNT: i64 = 1_000_000_000;

/// Money spent running the property, e.g. a plumber's invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// Amount in whole currency units.
    pub amount: i64,
    /// Day the cost was incurred.
    pub date_incurred: NaiveDate,
}

/// Data required to record or correct an expense.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewExpense {
    #[validate(length(min = 1, max = 500, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 0, max = 1000000000, message = "amount must be between 0 and 1,000,000,000"))]
    pub amount: i64,
    pub date_incurred: NaiveDate,
}

impl NewExpense {
    /// Turn the request into a stored record with a fresh id.
    pub fn into_expense(self) -> Expense {
        self.into_expense_with_id(ExpenseId::new())
    }

    /// Turn the request into the stored record `id`, replacing its fields.
    pub fn into_expense_with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            date_incurred: self.date_incurred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(description: &str, amount: i64) -> NewExpense {
        NewExpense {
            description: description.to_string(),
            amount,
            date_incurred: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form("Laundry service", 1_200).validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_and_negative() {
        assert!(form("", 10).validate().is_err());
        assert!(form("Refund", -5).validate().is_err());
        assert!(form("Roof", MAX_EXPENSE_AMOUNT + 1).validate().is_err());
    }

    #[test]
    fn test_into_expense_with_id_keeps_id() {
        let expense = form("  Paint  ", 300).into_expense();
        let corrected = form("Paint and brushes", 340).into_expense_with_id(expense.id);
        assert_eq!(corrected.id, expense.id);
        assert_eq!(corrected.amount, 340);
        assert_eq!(expense.description, "Paint");
    }
}
