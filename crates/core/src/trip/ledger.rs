//! In-memory trip ledger.
//!
//! Each plan exclusively owns its itineraries, expenses and logs. Every
//! operation validates first and mutates only on success, so a rejected
//! request leaves the ledger unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use journey_shared::types::{
    Currency, ExpenseId, ItineraryId, PageRequest, PageResponse, TravelLogId, TravelPlanId, UserId,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::expense::{
    Expense, ExpenseFilter, ExpensePatch, ExpenseService, ExpenseStatistics, NewExpense,
};
use crate::itinerary::{Itinerary, ItineraryPatch, ItineraryService, NewItinerary};
use crate::plan::{
    NewPlan, PlanChildren, PlanFilter, PlanLifecycle, PlanPatch, TravelPlan, TravelStatus,
    apply_patch, build_plan, generate_share_code,
};
use crate::travel_log::{FriendshipOracle, LogPatch, NewLog, TravelLog, TravelLogService, can_view};
use crate::trip::access::{SharedPlan, authorize_owner, authorize_reader};
use crate::trip::archive::{ArchiveCandidate, ArchiveReport, is_archivable};

#[derive(Debug, Clone)]
struct PlanRecord {
    plan: TravelPlan,
    itineraries: HashMap<ItineraryId, Itinerary>,
    expenses: HashMap<ExpenseId, Expense>,
    logs: HashMap<TravelLogId, TravelLog>,
}

impl PlanRecord {
    fn children(&self) -> PlanChildren {
        let dates = self.itineraries.values().map(|i| i.date);
        let first = dates.clone().min();
        PlanChildren {
            has_expenses: !self.expenses.is_empty(),
            itinerary_span: first.zip(dates.max()),
        }
    }

    fn check_itinerary_ref(&self, itinerary_id: Option<ItineraryId>) -> LedgerResult<()> {
        match itinerary_id {
            Some(id) if !self.itineraries.contains_key(&id) => {
                Err(ValidationError::ForeignItinerary(id).into())
            }
            _ => Ok(()),
        }
    }

    /// Total the plan would have with `replaced` swapped for `next`.
    ///
    /// Checked before any mutation so an unrepresentable total leaves the
    /// record untouched.
    fn total_with(
        &self,
        replaced: Option<ExpenseId>,
        next: Option<&Expense>,
    ) -> LedgerResult<Decimal> {
        let kept = self
            .expenses
            .values()
            .filter(|e| replaced.is_none_or(|id| e.id != id));
        Ok(ExpenseService::total(kept.chain(next))?)
    }

    /// Stores a precomputed total and bumps the version.
    fn set_total(&mut self, total: Decimal) {
        self.plan.total_cost = total;
        touch(&mut self.plan);
    }
}

fn touch(plan: &mut TravelPlan) {
    plan.version += 1;
    plan.updated_at = Utc::now();
}

/// Orders by `(date, created_at)` descending.
fn newest_first<T>(
    key: impl Fn(&T) -> (NaiveDate, DateTime<Utc>),
) -> impl Fn(&T, &T) -> std::cmp::Ordering {
    move |a, b| key(b).cmp(&key(a))
}

/// In-memory trip ledger.
pub struct TripLedger {
    plans: HashMap<TravelPlanId, PlanRecord>,
    share_codes: HashMap<String, TravelPlanId>,
    default_currency: Currency,
    friendships: Arc<dyn FriendshipOracle>,
}

impl std::fmt::Debug for TripLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripLedger")
            .field("plans", &self.plans.len())
            .field("default_currency", &self.default_currency)
            .finish_non_exhaustive()
    }
}

impl TripLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(default_currency: Currency, friendships: Arc<dyn FriendshipOracle>) -> Self {
        Self {
            plans: HashMap::new(),
            share_codes: HashMap::new(),
            default_currency,
            friendships,
        }
    }

    fn record(&self, plan_id: TravelPlanId) -> LedgerResult<&PlanRecord> {
        self.plans
            .get(&plan_id)
            .ok_or_else(|| LedgerError::not_found("travel plan", plan_id))
    }

    fn readable(&self, plan_id: TravelPlanId, requester: Option<UserId>) -> LedgerResult<&PlanRecord> {
        let record = self.record(plan_id)?;
        authorize_reader(&record.plan, requester)?;
        Ok(record)
    }

    fn owned_mut(&mut self, plan_id: TravelPlanId, requester: UserId) -> LedgerResult<&mut PlanRecord> {
        let record = self
            .plans
            .get_mut(&plan_id)
            .ok_or_else(|| LedgerError::not_found("travel plan", plan_id))?;
        authorize_owner(&record.plan, requester)?;
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------

    /// Creates a plan in `planning`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if any field rule fails.
    pub fn create_plan(&mut self, owner: UserId, input: NewPlan) -> LedgerResult<TravelPlan> {
        let plan = build_plan(owner, input, self.default_currency)?;
        self.plans.insert(
            plan.id,
            PlanRecord {
                plan: plan.clone(),
                itineraries: HashMap::new(),
                expenses: HashMap::new(),
                logs: HashMap::new(),
            },
        );
        Ok(plan)
    }

    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the plan is missing or hidden from `requester`.
    pub fn get_plan(&self, plan_id: TravelPlanId, requester: Option<UserId>) -> LedgerResult<&TravelPlan> {
        self.readable(plan_id, requester).map(|r| &r.plan)
    }

    /// Lists `owner`'s plans, newest first.
    #[must_use]
    pub fn list_plans(
        &self,
        owner: UserId,
        filter: &PlanFilter,
        page: PageRequest,
    ) -> PageResponse<TravelPlan> {
        let page = page.normalized();
        let mut plans: Vec<&TravelPlan> = self
            .plans
            .values()
            .map(|r| &r.plan)
            .filter(|p| p.is_owned_by(owner) && filter.matches(p))
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = plans.len() as u64;
        let data = plans
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        PageResponse::new(data, page.page, page.per_page, total)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners and `Validation` if the
    /// result breaks a field rule.
    pub fn update_plan(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        patch: PlanPatch,
    ) -> LedgerResult<TravelPlan> {
        let record = self.owned_mut(plan_id, requester)?;
        let children = record.children();
        apply_patch(&mut record.plan, patch, children)?;
        touch(&mut record.plan);
        Ok(record.plan.clone())
    }

    /// Moves the plan to `target` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidTransition` with the plan unchanged if
    /// `target` is not reachable from the current status.
    pub fn transition_status(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        target: TravelStatus,
    ) -> LedgerResult<TravelPlan> {
        let record = self.owned_mut(plan_id, requester)?;
        record.plan.status = PlanLifecycle::transition(record.plan.status, target)?;
        touch(&mut record.plan);
        Ok(record.plan.clone())
    }

    /// Makes the plan public (assigning a share code) or private (revoking it).
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners.
    pub fn set_visibility(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        is_public: bool,
    ) -> LedgerResult<TravelPlan> {
        let code = if is_public {
            let mut code = generate_share_code();
            while self.share_codes.contains_key(&code) {
                code = generate_share_code();
            }
            Some(code)
        } else {
            None
        };

        let record = self.owned_mut(plan_id, requester)?;
        let plan = &mut record.plan;
        let revoked = match (is_public, plan.share_code.is_some()) {
            (true, false) => {
                plan.share_code.clone_from(&code);
                None
            }
            (false, true) => plan.share_code.take(),
            _ => None,
        };
        plan.is_public = is_public;
        touch(plan);
        let plan = plan.clone();

        if let Some(old) = revoked {
            self.share_codes.remove(&old);
        }
        if let Some(code) = plan.share_code.clone() {
            self.share_codes.insert(code, plan.id);
        }
        Ok(plan)
    }

    /// Recomputes the cached total from the recorded expenses.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners, or `Validation` if
    /// the sum cannot be represented.
    pub fn recompute_totals(&mut self, plan_id: TravelPlanId, requester: UserId) -> LedgerResult<Decimal> {
        let record = self.owned_mut(plan_id, requester)?;
        let total = record.total_with(None, None)?;
        record.set_total(total);
        Ok(total)
    }

    /// Deletes the plan and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners.
    pub fn delete_plan(&mut self, plan_id: TravelPlanId, requester: UserId) -> LedgerResult<()> {
        self.owned_mut(plan_id, requester)?;
        if let Some(record) = self.plans.remove(&plan_id) {
            if let Some(code) = record.plan.share_code {
                self.share_codes.remove(&code);
            }
        }
        Ok(())
    }

    /// Resolves a share code to the plan and its public logs.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no public plan carries the code.
    pub fn shared_plan(&self, share_code: &str) -> LedgerResult<SharedPlan> {
        let record = self
            .share_codes
            .get(share_code)
            .and_then(|id| self.plans.get(id))
            .filter(|r| r.plan.is_public)
            .ok_or_else(|| LedgerError::not_found("shared plan", share_code))?;
        Ok(SharedPlan {
            plan: record.plan.clone(),
            logs: self.collect_visible_logs(record, None),
        })
    }

    // ------------------------------------------------------------------
    // Itineraries
    // ------------------------------------------------------------------

    /// Adds an itinerary item.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` outside planning/confirmed/in-progress, or
    /// `Validation` if a field rule fails.
    pub fn add_itinerary(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewItinerary,
    ) -> LedgerResult<Itinerary> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_itinerary_writable(&record.plan)?;
        let item = ItineraryService::build(&record.plan, input)?;
        record.itineraries.insert(item.id, item.clone());
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden or the item is missing.
    pub fn get_itinerary(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        itinerary_id: ItineraryId,
    ) -> LedgerResult<&Itinerary> {
        self.readable(plan_id, requester)?
            .itineraries
            .get(&itinerary_id)
            .ok_or_else(|| LedgerError::not_found("itinerary item", itinerary_id))
    }

    /// Lists items by day, then start time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from `requester`.
    pub fn list_itineraries(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<Vec<Itinerary>> {
        let mut items: Vec<Itinerary> = self
            .readable(plan_id, requester)?
            .itineraries
            .values()
            .cloned()
            .collect();
        items.sort_by(ItineraryService::schedule_order);
        Ok(items)
    }

    /// # Errors
    ///
    /// Same as [`Self::add_itinerary`], plus `NotFound` for a missing item.
    pub fn update_itinerary(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        itinerary_id: ItineraryId,
        patch: ItineraryPatch,
    ) -> LedgerResult<Itinerary> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_itinerary_writable(&record.plan)?;
        let current = record
            .itineraries
            .get(&itinerary_id)
            .ok_or_else(|| LedgerError::not_found("itinerary item", itinerary_id))?;
        let next = ItineraryService::patched(&record.plan, current, patch)?;
        record.itineraries.insert(itinerary_id, next.clone());
        Ok(next)
    }

    /// Deletes an item; expenses and logs pointing at it are detached.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_itinerary`].
    pub fn delete_itinerary(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        itinerary_id: ItineraryId,
    ) -> LedgerResult<()> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_itinerary_writable(&record.plan)?;
        record
            .itineraries
            .remove(&itinerary_id)
            .ok_or_else(|| LedgerError::not_found("itinerary item", itinerary_id))?;
        for expense in record.expenses.values_mut() {
            if expense.itinerary_id == Some(itinerary_id) {
                expense.itinerary_id = None;
            }
        }
        for log in record.logs.values_mut() {
            if log.itinerary_id == Some(itinerary_id) {
                log.itinerary_id = None;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    /// Records an expense and refreshes the plan total.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` for completed plans, or `Validation` for a
    /// bad field, a rate that breaks the exchange-rate rule, or an itinerary
    /// item of another plan.
    pub fn add_expense(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewExpense,
    ) -> LedgerResult<Expense> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_expense_writable(&record.plan)?;
        record.check_itinerary_ref(input.itinerary_id)?;
        let expense = ExpenseService::build(&record.plan, requester, input)?;
        let total = record.total_with(None, Some(&expense))?;
        record.expenses.insert(expense.id, expense.clone());
        record.set_total(total);
        Ok(expense)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden or the expense is missing.
    pub fn get_expense(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        expense_id: ExpenseId,
    ) -> LedgerResult<&Expense> {
        self.readable(plan_id, requester)?
            .expenses
            .get(&expense_id)
            .ok_or_else(|| LedgerError::not_found("expense", expense_id))
    }

    /// Lists expenses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from `requester`.
    pub fn list_expenses(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        filter: ExpenseFilter,
    ) -> LedgerResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .readable(plan_id, requester)?
            .expenses
            .values()
            .filter(|e| filter.category.is_none_or(|c| e.category == c))
            .cloned()
            .collect();
        expenses.sort_by(newest_first(|e: &Expense| (e.expense_date, e.created_at)));
        Ok(expenses)
    }

    /// # Errors
    ///
    /// Same as [`Self::add_expense`], plus `NotFound` for a missing expense.
    pub fn update_expense(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        expense_id: ExpenseId,
        patch: ExpensePatch,
    ) -> LedgerResult<Expense> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_expense_writable(&record.plan)?;
        record.check_itinerary_ref(patch.itinerary_id)?;
        let current = record
            .expenses
            .get(&expense_id)
            .ok_or_else(|| LedgerError::not_found("expense", expense_id))?;
        let next = ExpenseService::patched(&record.plan, current, patch)?;
        let total = record.total_with(Some(expense_id), Some(&next))?;
        record.expenses.insert(expense_id, next.clone());
        record.set_total(total);
        Ok(next)
    }

    /// # Errors
    ///
    /// Same as [`Self::update_expense`].
    pub fn delete_expense(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        expense_id: ExpenseId,
    ) -> LedgerResult<()> {
        let record = self.owned_mut(plan_id, requester)?;
        PlanLifecycle::ensure_expense_writable(&record.plan)?;
        if !record.expenses.contains_key(&expense_id) {
            return Err(LedgerError::not_found("expense", expense_id));
        }
        let total = record.total_with(Some(expense_id), None)?;
        record.expenses.remove(&expense_id);
        record.set_total(total);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from `requester`.
    pub fn expense_statistics(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<ExpenseStatistics> {
        let record = self.readable(plan_id, requester)?;
        let expenses: Vec<Expense> = record.expenses.values().cloned().collect();
        Ok(ExpenseStatistics::calculate(&record.plan, &expenses)?)
    }

    // ------------------------------------------------------------------
    // Logs
    // ------------------------------------------------------------------

    /// Writes a log entry. Logs are accepted in every status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners, or `Validation`.
    pub fn add_log(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewLog,
    ) -> LedgerResult<TravelLog> {
        let record = self.owned_mut(plan_id, requester)?;
        record.check_itinerary_ref(input.itinerary_id)?;
        let log = TravelLogService::build(&record.plan, requester, input)?;
        record.logs.insert(log.id, log.clone());
        Ok(log)
    }

    fn authored_log<'a>(
        &self,
        record: &'a PlanRecord,
        log_id: TravelLogId,
        requester: UserId,
    ) -> LedgerResult<&'a TravelLog> {
        let log = record
            .logs
            .get(&log_id)
            .filter(|log| can_view(log, Some(requester), self.friendships.as_ref()))
            .ok_or_else(|| LedgerError::not_found("travel log", log_id))?;
        if log.author_id == requester {
            Ok(log)
        } else {
            Err(LedgerError::Forbidden(
                "only the author can change this log".to_string(),
            ))
        }
    }

    /// Updates a log entry. Only its author may do so.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing or invisible log, `Forbidden` for a
    /// visible log written by someone else, or `Validation`.
    pub fn update_log(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        log_id: TravelLogId,
        patch: LogPatch,
    ) -> LedgerResult<TravelLog> {
        let record = self.readable(plan_id, Some(requester))?;
        let log = self.authored_log(record, log_id, requester)?;
        record.check_itinerary_ref(patch.itinerary_id)?;
        let next = TravelLogService::patched(log, patch)?;

        if let Some(record) = self.plans.get_mut(&plan_id) {
            record.logs.insert(log_id, next.clone());
        }
        Ok(next)
    }

    /// Deletes a log entry. Only its author may do so.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_log`].
    pub fn delete_log(
        &mut self,
        plan_id: TravelPlanId,
        requester: UserId,
        log_id: TravelLogId,
    ) -> LedgerResult<()> {
        let record = self.readable(plan_id, Some(requester))?;
        self.authored_log(record, log_id, requester)?;

        if let Some(record) = self.plans.get_mut(&plan_id) {
            record.logs.remove(&log_id);
        }
        Ok(())
    }

    fn collect_visible_logs(&self, record: &PlanRecord, requester: Option<UserId>) -> Vec<TravelLog> {
        let mut logs: Vec<TravelLog> = record
            .logs
            .values()
            .filter(|log| can_view(log, requester, self.friendships.as_ref()))
            .cloned()
            .collect();
        logs.sort_by(newest_first(|l: &TravelLog| (l.log_date, l.created_at)));
        logs
    }

    /// One log of a readable plan, if `requester` may read it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden, or the log is missing or
    /// not visible to `requester`.
    pub fn get_log(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        log_id: TravelLogId,
    ) -> LedgerResult<&TravelLog> {
        self.readable(plan_id, requester)?
            .logs
            .get(&log_id)
            .filter(|log| can_view(log, requester, self.friendships.as_ref()))
            .ok_or_else(|| LedgerError::not_found("travel log", log_id))
    }

    /// Logs of the plan that `requester` may read, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan does not exist or is hidden from
    /// `requester`.
    pub fn visible_logs(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<Vec<TravelLog>> {
        let record = self.readable(plan_id, requester)?;
        Ok(self.collect_visible_logs(record, requester))
    }

    // ------------------------------------------------------------------
    // Archival
    // ------------------------------------------------------------------

    /// Completed plans that ended before `cutoff`, with their current versions.
    #[must_use]
    pub fn archive_candidates(&self, cutoff: NaiveDate) -> Vec<ArchiveCandidate> {
        self.plans
            .values()
            .filter(|r| is_archivable(&r.plan, cutoff))
            .map(|r| ArchiveCandidate {
                plan_id: r.plan.id,
                version: r.plan.version,
            })
            .collect()
    }

    /// Archives the candidate if its plan is still at the observed version.
    ///
    /// Returns false, leaving the plan untouched, on a version mismatch.
    pub fn archive_if_unchanged(&mut self, candidate: ArchiveCandidate) -> bool {
        match self.plans.get_mut(&candidate.plan_id) {
            Some(record) if record.plan.version == candidate.version => {
                record.plan.archived_at = Some(Utc::now());
                touch(&mut record.plan);
                true
            }
            _ => false,
        }
    }

    /// Archives every completed plan that ended before `cutoff`.
    pub fn archive_completed_before(&mut self, cutoff: NaiveDate) -> ArchiveReport {
        let mut report = ArchiveReport::default();
        for candidate in self.archive_candidates(cutoff) {
            if self.archive_if_unchanged(candidate) {
                report.archived.push(candidate.plan_id);
            } else {
                report.skipped.push(candidate.plan_id);
            }
        }
        report
    }
}
