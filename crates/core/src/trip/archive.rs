//! Archival of completed plans.
//!
//! Archival reads candidates first and applies each one only if the plan's
//! version is unchanged; a plan written in between is skipped and picked up
//! on the next run.

use chrono::NaiveDate;
use journey_shared::types::TravelPlanId;
use serde::Serialize;

use crate::plan::{TravelPlan, TravelStatus};

/// A plan selected for archival, with the version it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveCandidate {
    /// Plan ID.
    pub plan_id: TravelPlanId,
    /// Version observed when the candidate was read.
    pub version: i64,
}

/// Outcome of one archival run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    /// Plans archived in this run.
    pub archived: Vec<TravelPlanId>,
    /// Plans skipped because they changed after being read.
    pub skipped: Vec<TravelPlanId>,
}

/// Completed, not yet archived, and ended before `cutoff`.
#[must_use]
pub fn is_archivable(plan: &TravelPlan, cutoff: NaiveDate) -> bool {
    plan.status == TravelStatus::Completed && plan.archived_at.is_none() && plan.end_date < cutoff
}
