//! Property tests for the trip ledger.

use chrono::NaiveDate;
use journey_shared::types::{Currency, ExpenseId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::expense::{ExpenseCategory, ExpenseFilter, ExpensePatch, NewExpense};
use crate::plan::{NewPlan, PlanLifecycle, TravelStatus};
use crate::travel_log::NoFriendships;
use crate::trip::TripLedger;

fn new_plan() -> NewPlan {
    NewPlan {
        title: "Props".to_string(),
        description: None,
        destination: "Lima".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        budget: None,
        currency: Some(Currency::Usd),
        tags: vec![],
        cover_image: None,
    }
}

#[derive(Debug, Clone)]
enum Write {
    Add { cents: i64, rate: Option<i64> },
    Update { pick: usize, cents: i64 },
    Delete { pick: usize },
}

fn arb_write() -> impl Strategy<Value = Write> {
    prop_oneof![
        (0i64..5_000_000, prop::option::of(1i64..100_000))
            .prop_map(|(cents, rate)| Write::Add { cents, rate }),
        (any::<usize>(), 0i64..5_000_000).prop_map(|(pick, cents)| Write::Update { pick, cents }),
        any::<usize>().prop_map(|pick| Write::Delete { pick }),
    ]
}

fn arb_status() -> impl Strategy<Value = TravelStatus> {
    prop::sample::select(TravelStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The cached total equals Σ amount × rate after every write.
    #[test]
    fn prop_cached_total_matches_expenses(writes in prop::collection::vec(arb_write(), 1..30)) {
        let mut ledger = TripLedger::new(Currency::Cny, Arc::new(NoFriendships));
        let owner = UserId::new();
        let plan = ledger.create_plan(owner, new_plan()).unwrap();
        let mut ids: Vec<ExpenseId> = Vec::new();

        for write in writes {
            match write {
                Write::Add { cents, rate } => {
                    let input = NewExpense {
                        itinerary_id: None,
                        title: "x".to_string(),
                        description: None,
                        amount: Decimal::new(cents, 2),
                        currency: Some(if rate.is_some() { Currency::Thb } else { Currency::Usd }),
                        exchange_rate: rate.map(|r| Decimal::new(r, 5)),
                        category: ExpenseCategory::Food,
                        expense_date: NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
                        location: None,
                        notes: None,
                    };
                    ids.push(ledger.add_expense(plan.id, owner, input).unwrap().id);
                }
                Write::Update { pick, cents } if !ids.is_empty() => {
                    let id = ids[pick % ids.len()];
                    let patch = ExpensePatch { amount: Some(Decimal::new(cents, 2)), ..ExpensePatch::default() };
                    ledger.update_expense(plan.id, owner, id, patch).unwrap();
                }
                Write::Delete { pick } if !ids.is_empty() => {
                    let id = ids.remove(pick % ids.len());
                    ledger.delete_expense(plan.id, owner, id).unwrap();
                }
                _ => {}
            }

            let expenses = ledger.list_expenses(plan.id, Some(owner), ExpenseFilter::default()).unwrap();
            let expected: Decimal = expenses.iter().map(|e| e.amount * e.exchange_rate).sum();
            prop_assert_eq!(ledger.get_plan(plan.id, Some(owner)).unwrap().total_cost, expected);
        }
    }

    /// A rejected transition leaves status and version untouched.
    #[test]
    fn prop_rejected_transition_is_noop(path in prop::collection::vec(arb_status(), 1..15)) {
        let mut ledger = TripLedger::new(Currency::Cny, Arc::new(NoFriendships));
        let owner = UserId::new();
        let plan = ledger.create_plan(owner, new_plan()).unwrap();

        for target in path {
            let before = ledger.get_plan(plan.id, Some(owner)).unwrap().clone();
            let result = ledger.transition_status(plan.id, owner, target);
            let after = ledger.get_plan(plan.id, Some(owner)).unwrap();
            if PlanLifecycle::is_valid_transition(before.status, target) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(after.status, target);
                prop_assert_eq!(after.version, before.version + 1);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(after.status, before.status);
                prop_assert_eq!(after.version, before.version);
            }
        }
    }
}
