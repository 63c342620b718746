//! Expense rules and plan totals.

use chrono::Utc;
use journey_shared::types::{Currency, ExpenseId, Money, UserId};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::expense::types::{Expense, ExpensePatch, NewExpense};
use crate::plan::TravelPlan;
use crate::validation::{check_amount, check_rate, check_title};

/// Stateless service for expense rules.
pub struct ExpenseService;

impl ExpenseService {
    /// Resolves the rate that converts `expense_currency` into `plan_currency`.
    ///
    /// Same currency: the rate is 1 and any other supplied rate is rejected.
    /// Different currency: a positive rate must be supplied.
    ///
    /// # Errors
    ///
    /// Returns `RateMustBeOne`, `RateRequired` or `NonPositiveRate`, or a
    /// range error for a rate that cannot be stored.
    pub fn resolve_rate(
        plan_currency: Currency,
        expense_currency: Currency,
        supplied: Option<Decimal>,
    ) -> Result<Decimal, ValidationError> {
        if plan_currency == expense_currency {
            return match supplied {
                None => Ok(Decimal::ONE),
                Some(rate) if rate == Decimal::ONE => Ok(Decimal::ONE),
                Some(_) => Err(ValidationError::RateMustBeOne),
            };
        }
        match supplied {
            None => Err(ValidationError::RateRequired {
                from: expense_currency,
                to: plan_currency,
            }),
            Some(rate) if rate <= Decimal::ZERO => Err(ValidationError::NonPositiveRate),
            Some(rate) => {
                check_rate(rate)?;
                Ok(rate.normalize())
            }
        }
    }

    /// Converts an expense amount into the plan currency. Exact; no rounding.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the product cannot be held exactly.
    pub fn base_amount(
        amount: Money,
        rate: Decimal,
        plan_currency: Currency,
    ) -> Result<Decimal, ValidationError> {
        amount
            .checked_convert(rate, plan_currency)
            .map(|converted| converted.amount)
            .ok_or(ValidationError::AmountOutOfRange {
                field: "amount_in_base_currency",
            })
    }

    fn validate(expense: &Expense) -> Result<(), ValidationError> {
        check_title(&expense.title)?;
        check_amount("amount", Some(expense.amount))
    }

    /// Builds a validated expense for `plan`.
    ///
    /// The caller checks that `input.itinerary_id`, if any, belongs to the plan.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn build(
        plan: &TravelPlan,
        recorded_by: UserId,
        input: NewExpense,
    ) -> Result<Expense, ValidationError> {
        let currency = input.currency.unwrap_or(plan.currency);
        let exchange_rate = Self::resolve_rate(plan.currency, currency, input.exchange_rate)?;
        check_amount("amount", Some(input.amount))?;
        let amount = input.amount.normalize();
        let amount_in_base_currency =
            Self::base_amount(Money::new(amount, currency), exchange_rate, plan.currency)?;
        let now = Utc::now();
        let expense = Expense {
            id: ExpenseId::new(),
            plan_id: plan.id,
            itinerary_id: input.itinerary_id,
            recorded_by,
            title: input.title.trim().to_string(),
            description: input.description,
            amount,
            currency,
            exchange_rate,
            amount_in_base_currency,
            category: input.category,
            expense_date: input.expense_date,
            location: input.location,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        Self::validate(&expense)?;
        Ok(expense)
    }

    /// Returns `expense` with `patch` applied and the base amount recomputed.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule of the patched expense.
    pub fn patched(
        plan: &TravelPlan,
        expense: &Expense,
        patch: ExpensePatch,
    ) -> Result<Expense, ValidationError> {
        let mut next = expense.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            next.amount = amount.normalize();
        }
        if patch.currency.is_some() || patch.exchange_rate.is_some() {
            next.currency = patch.currency.unwrap_or(next.currency);
            next.exchange_rate =
                Self::resolve_rate(plan.currency, next.currency, patch.exchange_rate)?;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(date) = patch.expense_date {
            next.expense_date = date;
        }
        if patch.itinerary_id.is_some() {
            next.itinerary_id = patch.itinerary_id;
        }
        next.description = patch.description.or(next.description);
        next.location = patch.location.or(next.location);
        next.notes = patch.notes.or(next.notes);

        Self::validate(&next)?;
        next.amount_in_base_currency = Self::base_amount(
            Money::new(next.amount, next.currency),
            next.exchange_rate,
            plan.currency,
        )?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Sums base-currency amounts.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the sum cannot be held exactly.
    pub fn total<'a>(
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> Result<Decimal, ValidationError> {
        expenses
            .into_iter()
            .try_fold(Decimal::ZERO, |sum, e| {
                exact_add(sum, e.amount_in_base_currency)
            })
            .ok_or(ValidationError::AmountOutOfRange { field: "total_cost" })
    }

    /// Moves a cached total from one expense value to another: `total - removed + added`.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the result cannot be held exactly.
    pub fn adjust_total(
        total: Decimal,
        removed: Decimal,
        added: Decimal,
    ) -> Result<Decimal, ValidationError> {
        exact_add(total, -removed)
            .and_then(|rest| exact_add(rest, added))
            .ok_or(ValidationError::AmountOutOfRange { field: "total_cost" })
    }
}

/// `a + b`, or `None` on overflow or when Decimal would round the result.
pub(crate) fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    (sum.scale() == a.scale().max(b.scale())).then_some(sum)
}
