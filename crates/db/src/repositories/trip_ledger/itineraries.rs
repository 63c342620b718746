//! Itinerary operations.

use journey_core::itinerary::{Itinerary, ItineraryPatch, ItineraryService, NewItinerary};
use journey_core::plan::PlanLifecycle;
use journey_core::{LedgerError, LedgerResult};
use journey_shared::types::{ItineraryId, TravelPlanId, UserId};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use super::{TripLedgerRepository, commit, lock_owned};
use crate::entities::itineraries;
use crate::repositories::mapping::{db_err, itinerary_from_model, itinerary_to_active};

impl TripLedgerRepository {
    async fn find_itinerary<C: ConnectionTrait>(
        conn: &C,
        plan_id: TravelPlanId,
        itinerary_id: ItineraryId,
    ) -> LedgerResult<Itinerary> {
        itineraries::Entity::find_by_id(itinerary_id.into_inner())
            .filter(itineraries::Column::PlanId.eq(plan_id.into_inner()))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(itinerary_from_model)
            .ok_or_else(|| LedgerError::not_found("itinerary item", itinerary_id))
    }

    /// Adds an item to the owner's plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` once the plan is completed or cancelled, or a
    /// validation error for a bad item.
    pub async fn add_itinerary(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewItinerary,
    ) -> LedgerResult<Itinerary> {
        let txn = self.begin().await?;
        let plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_itinerary_writable(&plan)?;
        let item = ItineraryService::build(&plan, input)?;
        let model = itinerary_to_active(&item)
            .insert(&txn)
            .await
            .map_err(db_err)?;
        commit(txn).await?;
        Ok(itinerary_from_model(model))
    }

    /// Fetches one item of a readable plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden or the item is missing.
    pub async fn get_itinerary(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        itinerary_id: ItineraryId,
    ) -> LedgerResult<Itinerary> {
        self.readable(plan_id, requester).await?;
        Self::find_itinerary(&self.db, plan_id, itinerary_id).await
    }

    /// Lists the plan's items in schedule order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from the requester.
    pub async fn list_itineraries(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<Vec<Itinerary>> {
        self.readable(plan_id, requester).await?;
        let mut items: Vec<Itinerary> = itineraries::Entity::find()
            .filter(itineraries::Column::PlanId.eq(plan_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(itinerary_from_model)
            .collect();
        items.sort_by(ItineraryService::schedule_order);
        Ok(items)
    }

    /// Applies a partial update to an item.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` once the plan is completed or cancelled, or a
    /// validation error for the patched item.
    pub async fn update_itinerary(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        itinerary_id: ItineraryId,
        patch: ItineraryPatch,
    ) -> LedgerResult<Itinerary> {
        let txn = self.begin().await?;
        let plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_itinerary_writable(&plan)?;
        let current = Self::find_itinerary(&txn, plan_id, itinerary_id).await?;
        let next = ItineraryService::patched(&plan, &current, patch)?;
        let model = itinerary_to_active(&next)
            .update(&txn)
            .await
            .map_err(db_err)?;
        commit(txn).await?;
        Ok(itinerary_from_model(model))
    }

    /// Deletes an item. Expenses and logs that referenced it are kept and
    /// detached by the `ON DELETE SET NULL` foreign keys.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` once the plan is completed or cancelled, or
    /// `NotFound` for an unknown item.
    pub async fn delete_itinerary(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        itinerary_id: ItineraryId,
    ) -> LedgerResult<()> {
        let txn = self.begin().await?;
        let plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_itinerary_writable(&plan)?;
        let result = itineraries::Entity::delete_by_id(itinerary_id.into_inner())
            .filter(itineraries::Column::PlanId.eq(plan_id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::not_found("itinerary item", itinerary_id));
        }
        commit(txn).await
    }
}
