//! Property tests for expense totals.

use chrono::NaiveDate;
use journey_shared::types::{Currency, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::expense::service::ExpenseService;
use crate::expense::types::{Expense, ExpenseCategory, ExpensePatch, NewExpense};
use crate::plan::{NewPlan, TravelPlan, build_plan};

fn plan() -> TravelPlan {
    build_plan(
        UserId::new(),
        NewPlan {
            title: "Props".to_string(),
            description: None,
            destination: "Anywhere".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap_or_default(),
            budget: None,
            currency: Some(Currency::Cny),
            tags: vec![],
            cover_image: None,
        },
        Currency::Cny,
    )
    .unwrap()
}

/// Amounts with up to 2 decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive rates with up to 4 decimal places.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..200_000).prop_map(|units| Decimal::new(units, 4))
}

#[derive(Debug, Clone)]
enum Op {
    Add(Decimal, Option<Decimal>),
    Update(usize, Decimal),
    Delete(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_amount(), prop::option::of(arb_rate())).prop_map(|(a, r)| Op::Add(a, r)),
        (any::<usize>(), arb_amount()).prop_map(|(i, a)| Op::Update(i, a)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

fn new_expense(amount: Decimal, rate: Option<Decimal>) -> NewExpense {
    NewExpense {
        itinerary_id: None,
        title: "item".to_string(),
        description: None,
        amount,
        currency: rate.map(|_| Currency::Usd),
        exchange_rate: rate,
        category: ExpenseCategory::Other,
        expense_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap_or_default(),
        location: None,
        notes: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After any sequence of writes the total equals Σ amount × rate.
    #[test]
    fn prop_total_tracks_writes(ops in prop::collection::vec(arb_op(), 0..40)) {
        let plan = plan();
        let mut expenses: Vec<Expense> = Vec::new();

        for op in ops {
            match op {
                Op::Add(amount, rate) => {
                    let expense = ExpenseService::build(&plan, plan.owner_id, new_expense(amount, rate));
                    prop_assert!(expense.is_ok());
                    expenses.extend(expense.ok());
                }
                Op::Update(i, amount) if !expenses.is_empty() => {
                    let idx = i % expenses.len();
                    let patch = ExpensePatch { amount: Some(amount), ..ExpensePatch::default() };
                    let updated = ExpenseService::patched(&plan, &expenses[idx], patch);
                    prop_assert!(updated.is_ok());
                    if let Ok(updated) = updated {
                        expenses[idx] = updated;
                    }
                }
                Op::Delete(i) if !expenses.is_empty() => {
                    let idx = i % expenses.len();
                    expenses.remove(idx);
                }
                _ => {}
            }
        }

        let expected: Decimal = expenses.iter().map(|e| e.amount * e.exchange_rate).sum();
        prop_assert_eq!(ExpenseService::total(&expenses), Ok(expected));
    }

    /// Foreign amounts are converted without rounding.
    #[test]
    fn prop_base_amount_exact(amount in arb_amount(), rate in arb_rate()) {
        let plan = plan();
        let expense = ExpenseService::build(&plan, plan.owner_id, new_expense(amount, Some(rate)));
        prop_assert!(expense.is_ok());
        if let Ok(expense) = expense {
            prop_assert_eq!(expense.amount_in_base_currency, amount * rate);
        }
    }

    /// Any amount and rate either builds an exact expense or is rejected; nothing panics.
    #[test]
    fn prop_extreme_inputs_never_panic(
        lo in any::<u32>(),
        mid in any::<u32>(),
        hi in any::<u32>(),
        scale in 0u32..=28,
        rate_units in 1i64..i64::MAX,
        rate_scale in 0u32..=28,
    ) {
        let amount = Decimal::from_parts(lo, mid, hi, false, scale);
        let rate = Decimal::new(rate_units, rate_scale);
        let plan = plan();
        if let Ok(expense) =
            ExpenseService::build(&plan, plan.owner_id, new_expense(amount, Some(rate)))
        {
            prop_assert_eq!(expense.amount_in_base_currency, expense.amount * expense.exchange_rate);
            prop_assert!(expense.amount_in_base_currency >= Decimal::ZERO);
        }
    }
}
