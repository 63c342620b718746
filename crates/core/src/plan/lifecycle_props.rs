//! Property tests for the plan state machine.

use proptest::prelude::*;

use crate::error::LedgerError;
use crate::plan::lifecycle::PlanLifecycle;
use crate::plan::types::TravelStatus;

fn arb_status() -> impl Strategy<Value = TravelStatus> {
    prop::sample::select(TravelStatus::ALL.to_vec())
}

/// Reference table, written out pair by pair.
fn expected(from: TravelStatus, to: TravelStatus) -> bool {
    use TravelStatus::{Cancelled, Completed, Confirmed, InProgress, Planning};
    matches!(
        (from, to),
        (Planning, Confirmed | Cancelled)
            | (Confirmed, InProgress | Cancelled)
            | (InProgress, Completed | Cancelled)
            | (Cancelled, Planning)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// transition succeeds iff the pair is in the table, otherwise reports both ends.
    #[test]
    fn prop_transition_matches_table(from in arb_status(), to in arb_status()) {
        match PlanLifecycle::transition(from, to) {
            Ok(next) => {
                prop_assert!(expected(from, to));
                prop_assert_eq!(next, to);
            }
            Err(LedgerError::InvalidTransition { from: f, to: t }) => {
                prop_assert!(!expected(from, to));
                prop_assert_eq!(f, from);
                prop_assert_eq!(t, to);
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// No status can transition to itself.
    #[test]
    fn prop_no_self_transition(status in arb_status()) {
        prop_assert!(!PlanLifecycle::is_valid_transition(status, status));
    }

    /// Walking any sequence of requests never leaves a completed plan.
    #[test]
    fn prop_completed_absorbs(targets in prop::collection::vec(arb_status(), 0..20)) {
        let mut status = TravelStatus::Completed;
        for target in targets {
            if let Ok(next) = PlanLifecycle::transition(status, target) {
                status = next;
            }
        }
        prop_assert_eq!(status, TravelStatus::Completed);
    }
}
