//! Expense statistics and budget usage.
//!
//! Totals stay exact; only the display fields are rounded (banker's rounding).

use journey_shared::types::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::expense::service::{ExpenseService, exact_add};
use crate::expense::types::{Expense, ExpenseCategory};
use crate::plan::TravelPlan;

/// Spending within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category.
    pub category: ExpenseCategory,
    /// Sum in the plan currency.
    pub amount: Decimal,
    /// Number of expenses.
    pub count: u64,
}

/// Where spending stands against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Spent less than the budget.
    UnderBudget,
    /// Spent exactly the budget.
    OnBudget,
    /// Spent more than the budget.
    OverBudget,
}

/// Budget usage of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetUsage {
    /// Budget.
    pub budget: Decimal,
    /// Total spent.
    pub spent: Decimal,
    /// `budget - spent`; negative when over budget.
    pub remaining: Decimal,
    /// `spent / budget × 100`, 2 dp. Zero when the budget is zero.
    pub utilization_percent: Decimal,
    /// Status.
    pub status: BudgetStatus,
}

impl BudgetUsage {
    /// Compares `spent` against `budget`.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the figures overflow.
    pub fn calculate(budget: Decimal, spent: Decimal) -> Result<Self, ValidationError> {
        let remaining = budget
            .checked_sub(spent)
            .ok_or(ValidationError::AmountOutOfRange { field: "remaining" })?;
        let status = match remaining.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => BudgetStatus::UnderBudget,
            std::cmp::Ordering::Equal => BudgetStatus::OnBudget,
            std::cmp::Ordering::Less => BudgetStatus::OverBudget,
        };
        let utilization_percent = if budget.is_zero() {
            Decimal::ZERO
        } else {
            spent
                .checked_div(budget)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(round_display)
                .ok_or(ValidationError::AmountOutOfRange {
                    field: "utilization_percent",
                })?
        };

        Ok(Self {
            budget,
            spent,
            remaining,
            utilization_percent,
            status,
        })
    }
}

/// Expense statistics for one plan.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseStatistics {
    /// Plan currency.
    pub currency: Currency,
    /// Exact total in the plan currency.
    pub total: Decimal,
    /// Number of expenses.
    pub count: u64,
    /// Per-category totals, in category order. Empty categories are omitted.
    pub by_category: Vec<CategoryTotal>,
    /// Budget usage, when the plan has a budget.
    pub budget: Option<BudgetUsage>,
}

impl ExpenseStatistics {
    /// Aggregates `expenses` of `plan`.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if a sum overflows.
    pub fn calculate(plan: &TravelPlan, expenses: &[Expense]) -> Result<Self, ValidationError> {
        let mut buckets: BTreeMap<ExpenseCategory, (Decimal, u64)> = BTreeMap::new();
        for expense in expenses {
            let entry = buckets
                .entry(expense.category)
                .or_insert((Decimal::ZERO, 0));
            entry.0 = exact_add(entry.0, expense.amount_in_base_currency)
                .ok_or(ValidationError::AmountOutOfRange { field: "category_total" })?;
            entry.1 += 1;
        }

        let total = ExpenseService::total(expenses)?;
        let budget = plan
            .budget
            .map(|budget| BudgetUsage::calculate(budget, total))
            .transpose()?;
        Ok(Self {
            currency: plan.currency,
            total,
            count: expenses.len() as u64,
            by_category: buckets
                .into_iter()
                .map(|(category, (amount, count))| CategoryTotal {
                    category,
                    amount,
                    count,
                })
                .collect(),
            budget,
        })
    }
}

fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
