//! Expenses, exchange-rate rules and aggregation.
//!
//! - `types` - Expense record, inputs and categories
//! - `service` - Rate resolution, base-currency amounts and plan totals
//! - `statistics` - Per-category totals and budget usage

pub mod service;
pub mod statistics;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ExpenseService;
pub use statistics::{BudgetStatus, BudgetUsage, CategoryTotal, ExpenseStatistics};
pub use types::{Expense, ExpenseCategory, ExpenseFilter, ExpensePatch, NewExpense};
