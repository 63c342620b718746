//! Plan status state machine.
//!
//! Also decides which child writes a plan accepts in each status.

use crate::error::LedgerError;
use crate::plan::types::{TravelPlan, TravelStatus};

/// Stateless service for plan status transitions.
pub struct PlanLifecycle;

impl PlanLifecycle {
    /// Returns the statuses reachable from `from` in one step.
    #[must_use]
    pub const fn allowed_targets(from: TravelStatus) -> &'static [TravelStatus] {
        match from {
            TravelStatus::Planning => &[TravelStatus::Confirmed, TravelStatus::Cancelled],
            TravelStatus::Confirmed => &[TravelStatus::InProgress, TravelStatus::Cancelled],
            TravelStatus::InProgress => &[TravelStatus::Completed, TravelStatus::Cancelled],
            TravelStatus::Completed => &[],
            TravelStatus::Cancelled => &[TravelStatus::Planning],
        }
    }

    /// Checks if a status transition is valid.
    ///
    /// A same-status request is never valid.
    #[must_use]
    pub fn is_valid_transition(from: TravelStatus, to: TravelStatus) -> bool {
        Self::allowed_targets(from).contains(&to)
    }

    /// Validates a transition and returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidTransition` if `to` is not reachable from `from`.
    pub fn transition(from: TravelStatus, to: TravelStatus) -> Result<TravelStatus, LedgerError> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(LedgerError::InvalidTransition { from, to })
        }
    }

    /// Itinerary items may change while the trip has not ended or been called off.
    #[must_use]
    pub const fn accepts_itinerary_writes(status: TravelStatus) -> bool {
        matches!(
            status,
            TravelStatus::Planning | TravelStatus::Confirmed | TravelStatus::InProgress
        )
    }

    /// Expenses may be recorded until the trip is completed.
    #[must_use]
    pub const fn accepts_expense_writes(status: TravelStatus) -> bool {
        !matches!(status, TravelStatus::Completed)
    }

    /// # Errors
    ///
    /// Returns `LedgerError::PlanNotEditable` if the plan does not accept itinerary writes.
    pub fn ensure_itinerary_writable(plan: &TravelPlan) -> Result<(), LedgerError> {
        if Self::accepts_itinerary_writes(plan.status) {
            Ok(())
        } else {
            Err(LedgerError::PlanNotEditable {
                status: plan.status,
                action: "change itinerary items",
            })
        }
    }

    /// # Errors
    ///
    /// Returns `LedgerError::PlanNotEditable` if the plan does not accept expense writes.
    pub fn ensure_expense_writable(plan: &TravelPlan) -> Result<(), LedgerError> {
        if Self::accepts_expense_writes(plan.status) {
            Ok(())
        } else {
            Err(LedgerError::PlanNotEditable {
                status: plan.status,
                action: "change expenses",
            })
        }
    }
}
