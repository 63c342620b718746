//! Who may read or change a plan.
//!
//! Plans a requester cannot see are reported as missing so their existence
//! does not leak. A public plan can be seen by anyone but only changed by
//! its owner.

use journey_shared::types::UserId;
use serde::Serialize;

use crate::error::LedgerError;
use crate::plan::TravelPlan;
use crate::travel_log::TravelLog;

/// A publicly shared plan as seen through its share code.
#[derive(Debug, Clone, Serialize)]
pub struct SharedPlan {
    /// The plan.
    pub plan: TravelPlan,
    /// Its public logs, newest first.
    pub logs: Vec<TravelLog>,
}

/// # Errors
///
/// Returns `LedgerError::NotFound` if `requester` may not see the plan.
pub fn authorize_reader(plan: &TravelPlan, requester: Option<UserId>) -> Result<(), LedgerError> {
    if plan.is_visible_to(requester) {
        Ok(())
    } else {
        Err(LedgerError::not_found("travel plan", plan.id))
    }
}

/// # Errors
///
/// Returns `LedgerError::NotFound` if `requester` may not see the plan, or
/// `LedgerError::Forbidden` if they see it but do not own it.
pub fn authorize_owner(plan: &TravelPlan, requester: UserId) -> Result<(), LedgerError> {
    if plan.is_owned_by(requester) {
        Ok(())
    } else if plan.is_public {
        Err(LedgerError::Forbidden(
            "only the plan owner can change this plan".to_string(),
        ))
    } else {
        Err(LedgerError::not_found("travel plan", plan.id))
    }
}
