//! Expense ledger commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use innkeep_core::error::AppError;
use innkeep_entity::expense::{Expense, NewExpense};
use innkeep_service::ServiceState;

use crate::output::{self, OutputFormat};

/// Arguments for expense commands
#[derive(Debug, Args)]
pub struct ExpenseArgs {
    /// Expense subcommand
    #[command(subcommand)]
    pub command: ExpenseCommand,
}

/// Expense subcommands
#[derive(Debug, Subcommand)]
pub enum ExpenseCommand {
    /// List expenses and their total
    List {
        /// Earliest date incurred
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date incurred
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Record an expense
    Add {
        /// What the money was spent on
        #[arg(short, long)]
        description: String,
        /// Amount in whole currency units
        #[arg(short, long)]
        amount: i64,
        /// Day incurred (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Correct an expense
    Update {
        /// Expense id or id prefix
        id: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<i64>,
        /// New date
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove an expense
    Delete {
        /// Expense id or id prefix
        id: String,
    },
}

/// Expense display row
#[derive(Debug, Serialize, Tabled)]
struct ExpenseRow {
    /// Short ID
    id: String,
    /// Date incurred
    date: String,
    /// Description
    description: String,
    /// Amount
    amount: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.short(),
            date: expense.date_incurred.to_string(),
            description: expense.description.clone(),
            amount: output::format_amount(expense.amount),
        }
    }
}

async fn resolve_expense(state: &ServiceState, id: &str) -> Result<Expense, AppError> {
    let summary = state.expenses.list(None, None).await?;
    super::resolve_prefix(summary.expenses, |e| e.id, id, "expense")
}

/// Execute expense commands
pub async fn execute(
    args: &ExpenseArgs,
    state: &ServiceState,
    format: OutputFormat,
) -> Result<bool, AppError> {
    match &args.command {
        ExpenseCommand::List { from, to } => {
            let summary = state.expenses.list(*from, *to).await?;
            match format {
                OutputFormat::Json => output::print_json(&summary),
                OutputFormat::Table => {
                    let rows: Vec<ExpenseRow> =
                        summary.expenses.iter().map(ExpenseRow::from).collect();
                    output::print_list(&rows, format);
                    output::print_kv("Total", &output::format_amount(summary.total));
                }
            }
            Ok(false)
        }
        ExpenseCommand::Add {
            description,
            amount,
            date,
        } => {
            let expense = state
                .expenses
                .record(NewExpense {
                    description: description.clone(),
                    amount: *amount,
                    date_incurred: date.unwrap_or_else(super::today),
                })
                .await?;
            output::print_success(&format!("Expense {} recorded", expense.id.short()));
            output::print_item(&ExpenseRow::from(&expense), format);
            Ok(true)
        }
        ExpenseCommand::Update {
            id,
            description,
            amount,
            date,
        } => {
            let current = resolve_expense(state, id).await?;
            let expense = state
                .expenses
                .update(
                    current.id,
                    NewExpense {
                        description: description.clone().unwrap_or(current.description),
                        amount: amount.unwrap_or(current.amount),
                        date_incurred: date.unwrap_or(current.date_incurred),
                    },
                )
                .await?;
            output::print_success(&format!("Expense {} updated", expense.id.short()));
            output::print_item(&ExpenseRow::from(&expense), format);
            Ok(true)
        }
        ExpenseCommand::Delete { id } => {
            let expense = resolve_expense(state, id).await?;
            state.expenses.delete(expense.id).await?;
            output::print_warning(&format!("Expense '{}' removed", expense.description));
            Ok(true)
        }
    }
}
