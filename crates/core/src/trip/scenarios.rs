//! End-to-end scenarios against the in-memory ledger.

use chrono::NaiveDate;
use journey_shared::types::{Currency, PageRequest, TravelLogId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::error::{LedgerError, ValidationError};
use crate::expense::{ExpenseCategory, ExpenseFilter, ExpensePatch, NewExpense};
use crate::itinerary::{ActivityType, NewItinerary};
use crate::plan::{NewPlan, PlanFilter, PlanPatch, TravelStatus};
use crate::travel_log::{LogPatch, NewLog, NoFriendships, PrivacyLevel, StaticFriendships};
use crate::trip::TripLedger;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn ledger() -> TripLedger {
    TripLedger::new(Currency::Cny, Arc::new(NoFriendships))
}

fn new_plan(title: &str) -> NewPlan {
    NewPlan {
        title: title.to_string(),
        description: None,
        destination: "Tokyo".to_string(),
        start_date: date(4, 1),
        end_date: date(4, 10),
        budget: Some(dec!(10000)),
        currency: None,
        tags: vec![],
        cover_image: None,
    }
}

fn expense(amount: Decimal, currency: Option<Currency>, rate: Option<Decimal>) -> NewExpense {
    NewExpense {
        itinerary_id: None,
        title: "Ticket".to_string(),
        description: None,
        amount,
        currency,
        exchange_rate: rate,
        category: ExpenseCategory::Transportation,
        expense_date: date(4, 2),
        location: None,
        notes: None,
    }
}

fn itinerary(day: i32) -> NewItinerary {
    NewItinerary {
        day_number: day,
        date: date(4, 1),
        title: None,
        location: "Shinjuku".to_string(),
        activity: "Arrive".to_string(),
        activity_type: ActivityType::Transportation,
        start_time: None,
        end_time: None,
        description: None,
        address: None,
        latitude: None,
        longitude: None,
        estimated_cost: None,
        actual_cost: None,
        booking_reference: None,
        notes: None,
    }
}

fn log(privacy_level: PrivacyLevel) -> NewLog {
    NewLog {
        itinerary_id: None,
        title: "Cherry blossoms".to_string(),
        content: "Ueno park was packed".to_string(),
        log_date: date(4, 3),
        privacy_level,
        rating: Some(5),
        location: None,
        latitude: None,
        longitude: None,
        weather: None,
        mood: None,
        images: vec![],
        tags: vec![],
    }
}

#[test]
fn test_foreign_expense_then_lifecycle() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Spring")).unwrap();
    assert_eq!(plan.status, TravelStatus::Planning);
    assert_eq!(plan.currency, Currency::Cny);

    ledger
        .add_expense(plan.id, owner, expense(dec!(100), Some(Currency::Usd), Some(dec!(7.0))))
        .unwrap();
    assert_eq!(ledger.get_plan(plan.id, Some(owner)).unwrap().total_cost, dec!(700));

    let confirmed = ledger
        .transition_status(plan.id, owner, TravelStatus::Confirmed)
        .unwrap();
    assert_eq!(confirmed.status, TravelStatus::Confirmed);

    let err = ledger
        .transition_status(plan.id, owner, TravelStatus::Completed)
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InvalidTransition {
            from: TravelStatus::Confirmed,
            to: TravelStatus::Completed
        }
    ));
    let after = ledger.get_plan(plan.id, Some(owner)).unwrap();
    assert_eq!(after.status, TravelStatus::Confirmed);
    assert_eq!(after.version, confirmed.version);
}

#[test]
fn test_reversed_dates_rejected() {
    let mut ledger = ledger();
    let mut input = new_plan("Backwards");
    input.start_date = date(4, 10);
    input.end_date = date(4, 1);
    let err = ledger.create_plan(UserId::new(), input).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::DateRange { .. })
    ));
}

#[test]
fn test_total_follows_expense_writes() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Totals")).unwrap();

    let a = ledger.add_expense(plan.id, owner, expense(dec!(250), None, None)).unwrap();
    let b = ledger
        .add_expense(plan.id, owner, expense(dec!(10), Some(Currency::Eur), Some(dec!(7.85))))
        .unwrap();
    assert_eq!(ledger.get_plan(plan.id, None).map(|p| p.total_cost).ok(), None);
    assert_eq!(ledger.get_plan(plan.id, Some(owner)).unwrap().total_cost, dec!(328.5));

    ledger
        .update_expense(
            plan.id,
            owner,
            a.id,
            ExpensePatch {
                amount: Some(dec!(50)),
                ..ExpensePatch::default()
            },
        )
        .unwrap();
    assert_eq!(ledger.get_plan(plan.id, Some(owner)).unwrap().total_cost, dec!(128.5));

    ledger.delete_expense(plan.id, owner, b.id).unwrap();
    let plan_now = ledger.get_plan(plan.id, Some(owner)).unwrap();
    assert_eq!(plan_now.total_cost, dec!(50));
    assert_eq!(ledger.recompute_totals(plan.id, owner).unwrap(), dec!(50));
}

#[test]
fn test_unrecordable_amounts_leave_ledger_unchanged() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Extreme")).unwrap();
    let kept = ledger.add_expense(plan.id, owner, expense(dec!(10), None, None)).unwrap();
    let before = ledger.get_plan(plan.id, Some(owner)).unwrap().clone();

    let overflow = ledger.add_expense(
        plan.id,
        owner,
        expense(Decimal::MAX, Some(Currency::Usd), Some(dec!(7.0))),
    );
    assert!(matches!(
        overflow,
        Err(LedgerError::Validation(ValidationError::AmountOutOfRange { field: "amount" }))
    ));

    let too_precise = ledger.add_expense(plan.id, owner, expense(dec!(0.00005), None, None));
    assert!(matches!(
        too_precise,
        Err(LedgerError::Validation(ValidationError::TooPrecise {
            field: "amount",
            max_scale: 4
        }))
    ));

    let huge_patch = ledger.update_expense(
        plan.id,
        owner,
        kept.id,
        ExpensePatch {
            amount: Some(dec!(1000000000000000)),
            ..ExpensePatch::default()
        },
    );
    assert!(matches!(huge_patch, Err(LedgerError::Validation(_))));

    let after = ledger.get_plan(plan.id, Some(owner)).unwrap();
    assert_eq!(after.total_cost, dec!(10));
    assert_eq!(after.version, before.version);
    assert_eq!(
        ledger.list_expenses(plan.id, Some(owner), ExpenseFilter::default()).unwrap().len(),
        1
    );
}

#[test]
fn test_largest_storable_expenses_total_exactly() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Ceiling")).unwrap();
    let largest = dec!(999999999999999.9999);

    ledger.add_expense(plan.id, owner, expense(largest, None, None)).unwrap();
    ledger.add_expense(plan.id, owner, expense(largest, None, None)).unwrap();
    let total = ledger.get_plan(plan.id, Some(owner)).unwrap().total_cost;
    assert_eq!(total, dec!(1999999999999999.9998));

    let stats = ledger.expense_statistics(plan.id, Some(owner)).unwrap();
    assert_eq!(stats.total, total);
    assert!(stats.budget.unwrap().remaining < Decimal::ZERO);
}

#[test]
fn test_rate_rule_rejects_same_currency_rate() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Rates")).unwrap();
    let err = ledger
        .add_expense(plan.id, owner, expense(dec!(10), Some(Currency::Cny), Some(dec!(2))))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::RateMustBeOne)
    ));
    let version = ledger.get_plan(plan.id, Some(owner)).unwrap().version;
    assert_eq!(version, plan.version);
}

#[test]
fn test_status_gating() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Gated")).unwrap();
    for status in [TravelStatus::Confirmed, TravelStatus::InProgress, TravelStatus::Completed] {
        ledger.transition_status(plan.id, owner, status).unwrap();
    }

    assert!(matches!(
        ledger.add_expense(plan.id, owner, expense(dec!(1), None, None)),
        Err(LedgerError::PlanNotEditable { status: TravelStatus::Completed, .. })
    ));
    assert!(matches!(
        ledger.add_itinerary(plan.id, owner, itinerary(1)),
        Err(LedgerError::PlanNotEditable { .. })
    ));
    assert!(ledger.add_log(plan.id, owner, log(PrivacyLevel::Private)).is_ok());
}

#[test]
fn test_cancelled_plan_accepts_expenses_not_itinerary() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Called off")).unwrap();
    ledger
        .transition_status(plan.id, owner, TravelStatus::Cancelled)
        .unwrap();

    assert!(ledger.add_expense(plan.id, owner, expense(dec!(80), None, None)).is_ok());
    assert!(ledger.add_itinerary(plan.id, owner, itinerary(1)).is_err());

    ledger
        .transition_status(plan.id, owner, TravelStatus::Planning)
        .unwrap();
    assert!(ledger.add_itinerary(plan.id, owner, itinerary(1)).is_ok());
}

#[test]
fn test_delete_plan_cascades() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Gone")).unwrap();
    let item = ledger.add_itinerary(plan.id, owner, itinerary(1)).unwrap();
    let spent = ledger.add_expense(plan.id, owner, expense(dec!(5), None, None)).unwrap();
    ledger.add_log(plan.id, owner, log(PrivacyLevel::Public)).unwrap();
    ledger.set_visibility(plan.id, owner, true).unwrap();
    let code = ledger
        .get_plan(plan.id, Some(owner))
        .unwrap()
        .share_code
        .clone()
        .unwrap();

    ledger.delete_plan(plan.id, owner).unwrap();

    assert!(matches!(
        ledger.get_plan(plan.id, Some(owner)),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(ledger.get_itinerary(plan.id, Some(owner), item.id).is_err());
    assert!(ledger.get_expense(plan.id, Some(owner), spent.id).is_err());
    assert!(ledger.visible_logs(plan.id, Some(owner)).is_err());
    assert!(ledger.shared_plan(&code).is_err());
}

#[test]
fn test_delete_itinerary_detaches_children() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Detach")).unwrap();
    let item = ledger.add_itinerary(plan.id, owner, itinerary(1)).unwrap();

    let mut input = expense(dec!(30), None, None);
    input.itinerary_id = Some(item.id);
    let spent = ledger.add_expense(plan.id, owner, input).unwrap();
    let mut entry = log(PrivacyLevel::Private);
    entry.itinerary_id = Some(item.id);
    let written = ledger.add_log(plan.id, owner, entry).unwrap();

    ledger.delete_itinerary(plan.id, owner, item.id).unwrap();

    assert_eq!(ledger.get_expense(plan.id, Some(owner), spent.id).unwrap().itinerary_id, None);
    let logs = ledger.visible_logs(plan.id, Some(owner)).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, written.id);
    assert_eq!(logs[0].itinerary_id, None);
}

#[test]
fn test_expense_must_reference_same_plan_itinerary() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan_a = ledger.create_plan(owner, new_plan("A")).unwrap();
    let plan_b = ledger.create_plan(owner, new_plan("B")).unwrap();
    let item_b = ledger.add_itinerary(plan_b.id, owner, itinerary(1)).unwrap();

    let mut input = expense(dec!(30), None, None);
    input.itinerary_id = Some(item_b.id);
    assert!(matches!(
        ledger.add_expense(plan_a.id, owner, input),
        Err(LedgerError::Validation(ValidationError::ForeignItinerary(id))) if id == item_b.id
    ));
}

#[test]
fn test_log_visibility() {
    let owner = UserId::new();
    let friend = UserId::new();
    let stranger = UserId::new();
    let mut ledger = TripLedger::new(
        Currency::Cny,
        Arc::new(StaticFriendships::new().with(owner, friend)),
    );
    let plan = ledger.create_plan(owner, new_plan("Diary")).unwrap();
    ledger.set_visibility(plan.id, owner, true).unwrap();
    let private = ledger.add_log(plan.id, owner, log(PrivacyLevel::Private)).unwrap();
    let friends = ledger.add_log(plan.id, owner, log(PrivacyLevel::Friends)).unwrap();
    let public = ledger.add_log(plan.id, owner, log(PrivacyLevel::Public)).unwrap();

    let ids = |requester| {
        let mut ids: Vec<_> = ledger
            .visible_logs(plan.id, requester)
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        ids.sort();
        ids
    };
    let sorted = |mut v: Vec<_>| {
        v.sort();
        v
    };

    assert_eq!(ids(Some(owner)), sorted(vec![private.id, friends.id, public.id]));
    assert_eq!(ids(Some(friend)), sorted(vec![friends.id, public.id]));
    assert_eq!(ids(Some(stranger)), vec![public.id]);
    assert_eq!(ids(None), vec![public.id]);

    assert_eq!(ledger.get_log(plan.id, Some(friend), friends.id).unwrap().id, friends.id);
    assert!(matches!(
        ledger.get_log(plan.id, Some(stranger), friends.id),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        ledger.get_log(plan.id, Some(owner), TravelLogId::new()),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn test_private_plan_hides_its_public_logs() {
    let owner = UserId::new();
    let friend = UserId::new();
    let stranger = UserId::new();
    let mut ledger = TripLedger::new(
        Currency::Cny,
        Arc::new(StaticFriendships::new().with(owner, friend)),
    );
    let plan = ledger.create_plan(owner, new_plan("Secret")).unwrap();
    let public = ledger.add_log(plan.id, owner, log(PrivacyLevel::Public)).unwrap();

    for requester in [Some(stranger), Some(friend), None] {
        assert!(matches!(
            ledger.visible_logs(plan.id, requester),
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(
            ledger.get_log(plan.id, requester, public.id),
            Err(LedgerError::NotFound { .. })
        ));
    }
    assert_eq!(ledger.visible_logs(plan.id, Some(owner)).unwrap().len(), 1);
    assert_eq!(ledger.get_log(plan.id, Some(owner), public.id).unwrap().id, public.id);

    ledger.set_visibility(plan.id, owner, true).unwrap();
    assert_eq!(ledger.visible_logs(plan.id, Some(stranger)).unwrap().len(), 1);
    assert!(ledger.get_log(plan.id, None, public.id).is_ok());
}

#[test]
fn test_only_author_edits_logs() {
    let owner = UserId::new();
    let friend = UserId::new();
    let mut ledger = TripLedger::new(
        Currency::Cny,
        Arc::new(StaticFriendships::new().with(owner, friend)),
    );
    let plan = ledger.create_plan(owner, new_plan("Edits")).unwrap();
    ledger.set_visibility(plan.id, owner, true).unwrap();
    let private = ledger.add_log(plan.id, owner, log(PrivacyLevel::Private)).unwrap();
    let friends = ledger.add_log(plan.id, owner, log(PrivacyLevel::Friends)).unwrap();

    assert!(matches!(
        ledger.delete_log(plan.id, friend, private.id),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        ledger.update_log(plan.id, friend, friends.id, LogPatch::default()),
        Err(LedgerError::Forbidden(_))
    ));

    let updated = ledger
        .update_log(
            plan.id,
            owner,
            friends.id,
            LogPatch {
                rating: Some(3),
                ..LogPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.rating, Some(3));
    assert!(matches!(
        ledger.update_log(
            plan.id,
            owner,
            friends.id,
            LogPatch {
                rating: Some(0),
                ..LogPatch::default()
            }
        ),
        Err(LedgerError::Validation(ValidationError::Rating(0)))
    ));
    ledger.delete_log(plan.id, owner, private.id).unwrap();
    assert_eq!(ledger.visible_logs(plan.id, Some(owner)).unwrap().len(), 1);
}

#[test]
fn test_non_owner_sees_not_found_for_private_plan() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let other = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Mine")).unwrap();

    assert!(matches!(
        ledger.get_plan(plan.id, Some(other)),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        ledger.transition_status(plan.id, other, TravelStatus::Confirmed),
        Err(LedgerError::NotFound { .. })
    ));

    ledger.set_visibility(plan.id, owner, true).unwrap();
    assert!(ledger.get_plan(plan.id, Some(other)).is_ok());
    assert!(matches!(
        ledger.add_expense(plan.id, other, expense(dec!(1), None, None)),
        Err(LedgerError::Forbidden(_))
    ));
}

#[test]
fn test_share_code_lifecycle() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Shared")).unwrap();
    ledger.add_log(plan.id, owner, log(PrivacyLevel::Public)).unwrap();
    ledger.add_log(plan.id, owner, log(PrivacyLevel::Private)).unwrap();

    let shared = ledger.set_visibility(plan.id, owner, true).unwrap();
    let code = shared.share_code.clone().unwrap();
    assert!(shared.is_public);

    let again = ledger.set_visibility(plan.id, owner, true).unwrap();
    assert_eq!(again.share_code.as_deref(), Some(code.as_str()));

    let view = ledger.shared_plan(&code).unwrap();
    assert_eq!(view.plan.id, plan.id);
    assert_eq!(view.logs.len(), 1);
    assert_eq!(view.logs[0].privacy_level, PrivacyLevel::Public);

    let hidden = ledger.set_visibility(plan.id, owner, false).unwrap();
    assert!(hidden.share_code.is_none());
    assert!(matches!(
        ledger.shared_plan(&code),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn test_update_plan_currency_locked_by_expenses() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Locked")).unwrap();
    ledger.add_expense(plan.id, owner, expense(dec!(1), None, None)).unwrap();
    let err = ledger
        .update_plan(
            plan.id,
            owner,
            PlanPatch {
                currency: Some(Currency::Usd),
                ..PlanPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::CurrencyLocked)
    ));

    let before = ledger.get_plan(plan.id, Some(owner)).unwrap().clone();
    let renamed = ledger
        .update_plan(
            plan.id,
            owner,
            PlanPatch {
                title: Some("Renamed".to_string()),
                ..PlanPatch::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.title, "Renamed");
    assert_eq!(renamed.version, before.version + 1);
    assert!(renamed.updated_at > before.updated_at);
}

#[test]
fn test_list_plans_filters_and_paginates() {
    let mut ledger = ledger();
    let owner = UserId::new();
    for i in 0..5 {
        let mut input = new_plan(&format!("Trip {i}"));
        if i % 2 == 0 {
            input.destination = "Kyoto".to_string();
        }
        ledger.create_plan(owner, input).unwrap();
    }
    ledger.create_plan(UserId::new(), new_plan("Someone else")).unwrap();

    let page = ledger.list_plans(owner, &PlanFilter::default(), PageRequest { page: 1, per_page: 2 });
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.data.len(), 2);

    let kyoto = PlanFilter {
        status: Some(TravelStatus::Planning),
        destination: Some("kyo".to_string()),
    };
    let page = ledger.list_plans(owner, &kyoto, PageRequest::default());
    assert_eq!(page.meta.total, 3);
}

#[test]
fn test_list_expenses_and_statistics() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Stats")).unwrap();
    let mut food = expense(dec!(120), None, None);
    food.category = ExpenseCategory::Food;
    food.expense_date = date(4, 5);
    ledger.add_expense(plan.id, owner, food).unwrap();
    ledger.add_expense(plan.id, owner, expense(dec!(300), None, None)).unwrap();
    ledger.add_expense(plan.id, owner, expense(dec!(80), None, None)).unwrap();

    let all = ledger.list_expenses(plan.id, Some(owner), ExpenseFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].category, ExpenseCategory::Food);

    let transport = ledger
        .list_expenses(
            plan.id,
            Some(owner),
            ExpenseFilter {
                category: Some(ExpenseCategory::Transportation),
            },
        )
        .unwrap();
    assert_eq!(transport.len(), 2);

    let stats = ledger.expense_statistics(plan.id, Some(owner)).unwrap();
    assert_eq!(stats.total, dec!(500));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.by_category.len(), 2);
    let transport_total = stats
        .by_category
        .iter()
        .find(|c| c.category == ExpenseCategory::Transportation)
        .unwrap();
    assert_eq!(transport_total.amount, dec!(380));
    assert_eq!(transport_total.count, 2);
    let budget = stats.budget.unwrap();
    assert_eq!(budget.remaining, dec!(9500));
    assert_eq!(budget.utilization_percent, dec!(5.00));
}

#[test]
fn test_itineraries_listed_in_schedule_order() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Order")).unwrap();
    let day2 = ledger.add_itinerary(plan.id, owner, itinerary(2)).unwrap();
    let day1 = ledger.add_itinerary(plan.id, owner, itinerary(1)).unwrap();

    let items = ledger.list_itineraries(plan.id, Some(owner)).unwrap();
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![day1.id, day2.id]);
}

#[test]
fn test_archive_skips_plan_changed_after_read() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let finished = ledger.create_plan(owner, new_plan("Finished")).unwrap();
    let touched = ledger.create_plan(owner, new_plan("Touched")).unwrap();
    let ongoing = ledger.create_plan(owner, new_plan("Ongoing")).unwrap();
    for id in [finished.id, touched.id] {
        for status in [TravelStatus::Confirmed, TravelStatus::InProgress, TravelStatus::Completed] {
            ledger.transition_status(id, owner, status).unwrap();
        }
    }
    ledger
        .transition_status(ongoing.id, owner, TravelStatus::Confirmed)
        .unwrap();

    let cutoff = date(5, 1);
    let candidates = ledger.archive_candidates(cutoff);
    assert_eq!(candidates.len(), 2);

    ledger.set_visibility(touched.id, owner, true).unwrap();

    let mut archived = Vec::new();
    let mut skipped = Vec::new();
    for candidate in candidates {
        if ledger.archive_if_unchanged(candidate) {
            archived.push(candidate.plan_id);
        } else {
            skipped.push(candidate.plan_id);
        }
    }
    assert_eq!(archived, vec![finished.id]);
    assert_eq!(skipped, vec![touched.id]);
    assert!(ledger.get_plan(finished.id, Some(owner)).unwrap().archived_at.is_some());
    assert!(ledger.get_plan(touched.id, Some(owner)).unwrap().archived_at.is_none());

    // The skipped plan is picked up on the next run.
    let report = ledger.archive_completed_before(cutoff);
    assert_eq!(report.archived, vec![touched.id]);
    assert!(report.skipped.is_empty());
    assert!(ledger.archive_completed_before(cutoff).archived.is_empty());
}

#[test]
fn test_archive_respects_cutoff() {
    let mut ledger = ledger();
    let owner = UserId::new();
    let plan = ledger.create_plan(owner, new_plan("Recent")).unwrap();
    for status in [TravelStatus::Confirmed, TravelStatus::InProgress, TravelStatus::Completed] {
        ledger.transition_status(plan.id, owner, status).unwrap();
    }
    assert!(ledger.archive_completed_before(date(4, 10)).archived.is_empty());
    assert_eq!(ledger.archive_completed_before(date(4, 11)).archived, vec![plan.id]);
}
