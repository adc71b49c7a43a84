//! Recording, correcting and listing expenses.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use innkeep_core::error::AppError;
use innkeep_core::types::ExpenseId;
use innkeep_entity::expense::{Expense, NewExpense};
use innkeep_store::ExpenseStore;

/// Expenses in a date range and what they add up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    pub expenses: Vec<Expense>,
    pub total: i64,
}

/// Manages the expense ledger.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseStore>,
}

fn validate_form(req: &NewExpense) -> Result<(), AppError> {
    req.validate()?;
    if req.description.trim().is_empty() {
        return Err(AppError::validation("Expense description is required"));
    }
    Ok(())
}

impl ExpenseService {
    /// Creates a new expense service.
    pub fn new(expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { expenses }
    }

    /// Records an expense.
    pub async fn record(&self, req: NewExpense) -> Result<Expense, AppError> {
        validate_form(&req)?;
        let expense = self.expenses.save_expense(req.into_expense()).await?;
        info!(
            expense_id = %expense.id,
            amount = expense.amount,
            date = %expense.date_incurred,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Gets an expense by ID.
    pub async fn get(&self, id: ExpenseId) -> Result<Expense, AppError> {
        self.expenses
            .get_expense(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Expense {id} not found")))
    }

    /// Replaces description, amount and date of an existing expense.
    pub async fn update(&self, id: ExpenseId, req: NewExpense) -> Result<Expense, AppError> {
        validate_form(&req)?;
        self.get(id).await?;
        let expense = self.expenses.save_expense(req.into_expense_with_id(id)).await?;
        info!(expense_id = %id, amount = expense.amount, "Expense corrected");
        Ok(expense)
    }

    /// Removes an expense.
    pub async fn delete(&self, id: ExpenseId) -> Result<(), AppError> {
        self.expenses.delete_expense(id).await
    }

    /// Expenses incurred within `[from, to]` (either bound optional),
    /// oldest first, with their total.
    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<ExpenseSummary, AppError> {
        let expenses: Vec<Expense> = self
            .expenses
            .list_expenses()
            .await?
            .into_iter()
            .filter(|e| from.is_none_or(|d| e.date_incurred >= d))
            .filter(|e| to.is_none_or(|d| e.date_incurred <= d))
            .collect();

        let total = expenses
            .iter()
            .try_fold(0i64, |sum, e| sum.checked_add(e.amount))
            .ok_or_else(|| AppError::validation("Expense total is out of range"))?;

        Ok(ExpenseSummary { expenses, total })
    }
}
