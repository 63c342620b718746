//! Travel log operations.
//!
//! Log writes do not touch the plan row, so the plan version is unchanged.
//! The plan row is still locked so a log cannot land on a plan being deleted.

use journey_core::travel_log::{LogPatch, NewLog, TravelLog, TravelLogService, can_view};
use journey_core::trip::authorize_reader;
use journey_core::{LedgerError, LedgerResult};
use journey_shared::types::{TravelLogId, TravelPlanId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::{TripLedgerRepository, check_itinerary_ref, commit, lock_owned, lock_plan};
use crate::entities::travel_logs;
use crate::repositories::mapping::{db_err, log_from_model, log_to_active};

impl TripLedgerRepository {
    /// Loads a log the requester wrote. Logs hidden from the requester read
    /// as missing; visible logs by someone else are forbidden.
    async fn authored_log(
        &self,
        txn: &DatabaseTransaction,
        plan_id: TravelPlanId,
        log_id: TravelLogId,
        requester: UserId,
    ) -> LedgerResult<TravelLog> {
        let model = travel_logs::Entity::find_by_id(log_id.into_inner())
            .filter(travel_logs::Column::PlanId.eq(plan_id.into_inner()))
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(db_err)?;
        let log = model
            .map(log_from_model)
            .transpose()?
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

    /// Writes a journal entry on the owner's plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`/`Forbidden` for non-owners or a validation error.
    pub async fn add_log(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewLog,
    ) -> LedgerResult<TravelLog> {
        let txn = self.begin().await?;
        let plan = lock_owned(&txn, plan_id, requester).await?;
        check_itinerary_ref(&txn, plan_id, input.itinerary_id).await?;
        let log = TravelLogService::build(&plan, requester, input)?;
        let model = log_to_active(&log).insert(&txn).await.map_err(db_err)?;
        commit(txn).await?;
        log_from_model(model)
    }

    /// Applies a partial update to the requester's own log.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for logs the requester cannot see, `Forbidden` for
    /// other authors' logs, or a validation error.
    pub async fn update_log(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        log_id: TravelLogId,
        patch: LogPatch,
    ) -> LedgerResult<TravelLog> {
        let txn = self.begin().await?;
        let plan = lock_plan(&txn, plan_id).await?;
        authorize_reader(&plan, Some(requester))?;
        let current = self.authored_log(&txn, plan_id, log_id, requester).await?;
        check_itinerary_ref(&txn, plan_id, patch.itinerary_id).await?;
        let next = TravelLogService::patched(&current, patch)?;
        let model = log_to_active(&next).update(&txn).await.map_err(db_err)?;
        commit(txn).await?;
        log_from_model(model)
    }

    /// Deletes the requester's own log.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for logs the requester cannot see or `Forbidden`
    /// for other authors' logs.
    pub async fn delete_log(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        log_id: TravelLogId,
    ) -> LedgerResult<()> {
        let txn = self.begin().await?;
        let plan = lock_plan(&txn, plan_id).await?;
        authorize_reader(&plan, Some(requester))?;
        self.authored_log(&txn, plan_id, log_id, requester).await?;
        travel_logs::Entity::delete_by_id(log_id.into_inner())
            .exec(&txn)
            .await
            .map_err(db_err)?;
        commit(txn).await
    }

    /// One log of a readable plan, if the requester may read it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden, or the log is missing or
    /// not visible to the requester.
    pub async fn get_log(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        log_id: TravelLogId,
    ) -> LedgerResult<TravelLog> {
        self.readable(plan_id, requester).await?;
        let model = travel_logs::Entity::find_by_id(log_id.into_inner())
            .filter(travel_logs::Column::PlanId.eq(plan_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model
            .map(log_from_model)
            .transpose()?
            .filter(|log| can_view(log, requester, self.friendships.as_ref()))
            .ok_or_else(|| LedgerError::not_found("travel log", log_id))
    }

    /// The plan's logs the requester may read, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan does not exist or is hidden from the
    /// requester.
    pub async fn visible_logs(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<Vec<TravelLog>> {
        self.readable(plan_id, requester).await?;
        let logs = travel_logs::Entity::find()
            .filter(travel_logs::Column::PlanId.eq(plan_id.into_inner()))
            .order_by_desc(travel_logs::Column::LogDate)
            .order_by_desc(travel_logs::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(log_from_model)
            .collect::<LedgerResult<Vec<_>>>()?;
        Ok(logs
            .into_iter()
            .filter(|log| can_view(log, requester, self.friendships.as_ref()))
            .collect())
    }
}
