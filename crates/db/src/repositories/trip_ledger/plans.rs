//! Plan operations.

use journey_core::plan::{
    NewPlan, PlanFilter, PlanLifecycle, PlanPatch, TravelPlan, TravelStatus, apply_patch,
    build_plan, generate_share_code,
};
use journey_core::travel_log::can_view;
use journey_core::trip::SharedPlan;
use journey_core::{LedgerError, LedgerResult};
use journey_shared::types::{PageRequest, PageResponse, TravelPlanId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::info;

use super::{TripLedgerRepository, commit, lock_owned, plan_children, refresh_total, save_plan};
use crate::entities::{travel_logs, travel_plans};
use crate::repositories::mapping::{
    db_err, log_from_model, plan_from_model, plan_to_active, status_to_db,
};

/// Attempts at drawing an unused share code before giving up.
const SHARE_CODE_ATTEMPTS: usize = 8;

/// Escapes `LIKE` wildcards so user input matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

async fn unused_share_code<C: ConnectionTrait>(conn: &C) -> LedgerResult<String> {
    for _ in 0..SHARE_CODE_ATTEMPTS {
        let code = generate_share_code();
        let taken = travel_plans::Entity::find()
            .filter(travel_plans::Column::ShareCode.eq(code.as_str()))
            .count(conn)
            .await
            .map_err(db_err)?;
        if taken == 0 {
            return Ok(code);
        }
    }
    Err(LedgerError::Conflict(
        "could not allocate a unique share code".to_string(),
    ))
}

impl TripLedgerRepository {
    /// Creates a plan in `Planning` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input or a database error.
    pub async fn create_plan(&self, owner: UserId, input: NewPlan) -> LedgerResult<TravelPlan> {
        let plan = build_plan(owner, input, self.default_currency)?;
        let model = plan_to_active(&plan)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!(plan_id = %plan.id, owner_id = %owner, "Created travel plan");
        plan_from_model(model)
    }

    /// Fetches a plan the requester may read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is missing or private to someone else.
    pub async fn get_plan(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<TravelPlan> {
        self.readable(plan_id, requester).await
    }

    /// Lists the owner's plans, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_plans(
        &self,
        owner: UserId,
        filter: &PlanFilter,
        page: PageRequest,
    ) -> LedgerResult<PageResponse<TravelPlan>> {
        let page = page.normalized();
        let mut query = travel_plans::Entity::find()
            .filter(travel_plans::Column::OwnerId.eq(owner.into_inner()));
        if let Some(status) = filter.status {
            query = query.filter(travel_plans::Column::Status.eq(status_to_db(status)));
        }
        if let Some(needle) = filter.destination.as_deref().filter(|n| !n.trim().is_empty()) {
            query = query.filter(
                Expr::col(travel_plans::Column::Destination)
                    .ilike(like_pattern(needle.trim())),
            );
        }

        let paginator = query
            .order_by_desc(travel_plans::Column::CreatedAt)
            .order_by_desc(travel_plans::Column::Id)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(u64::from(page.page - 1))
            .await
            .map_err(db_err)?;

        let data = models
            .into_iter()
            .map(plan_from_model)
            .collect::<LedgerResult<Vec<_>>>()?;
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Applies a partial update to the owner's plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners and a validation error
    /// when the patched plan breaks a field rule.
    pub async fn update_plan(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        patch: PlanPatch,
    ) -> LedgerResult<TravelPlan> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        let children = plan_children(&txn, plan_id).await?;
        apply_patch(&mut plan, patch, children)?;
        save_plan(&txn, &mut plan).await?;
        commit(txn).await?;
        Ok(plan)
    }

    /// Moves the plan to `target` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for edges outside the lifecycle table.
    pub async fn transition_status(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        target: TravelStatus,
    ) -> LedgerResult<TravelPlan> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        let from = plan.status;
        plan.status = PlanLifecycle::transition(from, target)?;
        save_plan(&txn, &mut plan).await?;
        commit(txn).await?;

        info!(%plan_id, %from, to = %target, "Travel plan status changed");
        Ok(plan)
    }

    /// Makes the plan public or private.
    ///
    /// Going public issues a share code unless one exists. Going private
    /// revokes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners, or `Conflict` if no
    /// unique share code could be allocated.
    pub async fn set_visibility(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        is_public: bool,
    ) -> LedgerResult<TravelPlan> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        if is_public && plan.share_code.is_none() {
            plan.share_code = Some(unused_share_code(&txn).await?);
        } else if !is_public {
            plan.share_code = None;
        }
        plan.is_public = is_public;
        save_plan(&txn, &mut plan).await?;
        commit(txn).await?;
        Ok(plan)
    }

    /// Rewrites `total_cost` from the stored expenses and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners.
    pub async fn recompute_totals(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
    ) -> LedgerResult<Decimal> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        let total = refresh_total(&txn, &mut plan).await?;
        commit(txn).await?;
        Ok(total)
    }

    /// Deletes the plan with its itineraries, expenses and logs.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners.
    pub async fn delete_plan(&self, plan_id: TravelPlanId, requester: UserId) -> LedgerResult<()> {
        let txn = self.begin().await?;
        lock_owned(&txn, plan_id, requester).await?;
        travel_plans::Entity::delete_by_id(plan_id.into_inner())
            .exec(&txn)
            .await
            .map_err(db_err)?;
        commit(txn).await?;

        info!(%plan_id, "Deleted travel plan");
        Ok(())
    }

    /// Resolves a share code to the public plan and its public logs.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown or revoked codes.
    pub async fn shared_plan(&self, share_code: &str) -> LedgerResult<SharedPlan> {
        let model = travel_plans::Entity::find()
            .filter(travel_plans::Column::ShareCode.eq(share_code))
            .filter(travel_plans::Column::IsPublic.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| LedgerError::not_found("shared plan", share_code))?;
        let plan = plan_from_model(model)?;

        let logs = travel_logs::Entity::find()
            .filter(travel_logs::Column::PlanId.eq(plan.id.into_inner()))
            .order_by_desc(travel_logs::Column::LogDate)
            .order_by_desc(travel_logs::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(log_from_model)
            .collect::<LedgerResult<Vec<_>>>()?
            .into_iter()
            .filter(|log| can_view(log, None, self.friendships.as_ref()))
            .collect();

        Ok(SharedPlan { plan, logs })
    }
}
