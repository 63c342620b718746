//! PostgreSQL-backed trip ledger.
//!
//! Every write runs in one transaction that first takes an exclusive lock on
//! the plan row, so concurrent writers to the same plan serialize and the
//! stored `total_cost` always equals the sum of the plan's expenses. The
//! domain rules themselves live in `journey-core`; this repository loads the
//! locked state, runs the same rule functions the in-memory ledger uses and
//! persists the result.

mod archive;
mod expenses;
mod itineraries;
mod logs;
mod plans;

use chrono::{NaiveDate, Utc};
use journey_core::plan::{PlanChildren, TravelPlan};
use journey_core::travel_log::FriendshipOracle;
use journey_core::trip::{authorize_owner, authorize_reader};
use journey_core::{LedgerError, LedgerResult, ValidationError};
use journey_shared::types::{Currency, ItineraryId, TravelPlanId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use std::sync::Arc;

use super::mapping::{db_err, plan_from_model, plan_to_active};
use crate::entities::travel_plans;

/// Trip ledger repository.
#[derive(Clone)]
pub struct TripLedgerRepository {
    db: DatabaseConnection,
    default_currency: Currency,
    friendships: Arc<dyn FriendshipOracle>,
}

impl std::fmt::Debug for TripLedgerRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripLedgerRepository")
            .field("default_currency", &self.default_currency)
            .finish_non_exhaustive()
    }
}

impl TripLedgerRepository {
    /// Creates a new trip ledger repository.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        default_currency: Currency,
        friendships: Arc<dyn FriendshipOracle>,
    ) -> Self {
        Self {
            db,
            default_currency,
            friendships,
        }
    }

    async fn begin(&self) -> LedgerResult<DatabaseTransaction> {
        self.db.begin().await.map_err(db_err)
    }

    /// Loads a plan the requester may read. No lock is taken.
    async fn readable(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<TravelPlan> {
        let plan = find_plan(&self.db, plan_id).await?;
        authorize_reader(&plan, requester)?;
        Ok(plan)
    }
}

async fn find_plan<C: ConnectionTrait>(conn: &C, plan_id: TravelPlanId) -> LedgerResult<TravelPlan> {
    let model = travel_plans::Entity::find_by_id(plan_id.into_inner())
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| LedgerError::not_found("travel plan", plan_id))?;
    plan_from_model(model)
}

/// Loads the plan row with `SELECT ... FOR UPDATE`.
async fn lock_plan(txn: &DatabaseTransaction, plan_id: TravelPlanId) -> LedgerResult<TravelPlan> {
    let model = travel_plans::Entity::find_by_id(plan_id.into_inner())
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| LedgerError::not_found("travel plan", plan_id))?;
    plan_from_model(model)
}

/// Locks the plan and checks that `requester` owns it.
async fn lock_owned(
    txn: &DatabaseTransaction,
    plan_id: TravelPlanId,
    requester: UserId,
) -> LedgerResult<TravelPlan> {
    let plan = lock_plan(txn, plan_id).await?;
    authorize_owner(&plan, requester)?;
    Ok(plan)
}

/// Bumps the version and writes the whole plan row.
async fn save_plan(txn: &DatabaseTransaction, plan: &mut TravelPlan) -> LedgerResult<()> {
    plan.version += 1;
    plan.updated_at = Utc::now();
    plan_to_active(plan).update(txn).await.map_err(db_err)?;
    Ok(())
}

/// Recomputes `total_cost` from the stored expenses and saves the plan.
async fn refresh_total(txn: &DatabaseTransaction, plan: &mut TravelPlan) -> LedgerResult<Decimal> {
    let sum: Option<Option<Decimal>> = crate::entities::expenses::Entity::find()
        .select_only()
        .column_as(Expr::col(crate::entities::expenses::Column::AmountInBaseCurrency).sum(), "total")
        .filter(crate::entities::expenses::Column::PlanId.eq(plan.id.into_inner()))
        .into_tuple()
        .one(txn)
        .await
        .map_err(db_err)?;
    plan.total_cost = sum.flatten().unwrap_or(Decimal::ZERO);
    save_plan(txn, plan).await?;
    Ok(plan.total_cost)
}

async fn plan_children(txn: &DatabaseTransaction, plan_id: TravelPlanId) -> LedgerResult<PlanChildren> {
    let expense_count = crate::entities::expenses::Entity::find()
        .filter(crate::entities::expenses::Column::PlanId.eq(plan_id.into_inner()))
        .count(txn)
        .await
        .map_err(db_err)?;

    let span: Option<(Option<NaiveDate>, Option<NaiveDate>)> = crate::entities::itineraries::Entity::find()
        .select_only()
        .column_as(Expr::col(crate::entities::itineraries::Column::Date).min(), "first")
        .column_as(Expr::col(crate::entities::itineraries::Column::Date).max(), "last")
        .filter(crate::entities::itineraries::Column::PlanId.eq(plan_id.into_inner()))
        .into_tuple()
        .one(txn)
        .await
        .map_err(db_err)?;

    Ok(PlanChildren {
        has_expenses: expense_count > 0,
        itinerary_span: span.and_then(|(first, last)| first.zip(last)),
    })
}

/// Checks that a referenced itinerary item belongs to the plan.
async fn check_itinerary_ref(
    txn: &DatabaseTransaction,
    plan_id: TravelPlanId,
    itinerary_id: Option<ItineraryId>,
) -> LedgerResult<()> {
    let Some(itinerary_id) = itinerary_id else {
        return Ok(());
    };
    let found = crate::entities::itineraries::Entity::find_by_id(itinerary_id.into_inner())
        .filter(crate::entities::itineraries::Column::PlanId.eq(plan_id.into_inner()))
        .count(txn)
        .await
        .map_err(db_err)?;
    if found == 0 {
        return Err(ValidationError::ForeignItinerary(itinerary_id).into());
    }
    Ok(())
}

async fn commit(txn: DatabaseTransaction) -> LedgerResult<()> {
    txn.commit().await.map_err(db_err)
}
