//! Expense operations. Every write refreshes the plan's `total_cost` in the
//! same transaction.

use journey_core::expense::{
    Expense, ExpenseFilter, ExpensePatch, ExpenseService, ExpenseStatistics, NewExpense,
};
use journey_core::plan::PlanLifecycle;
use journey_core::{LedgerError, LedgerResult};
use journey_shared::types::{ExpenseId, TravelPlanId, UserId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::{TripLedgerRepository, check_itinerary_ref, commit, lock_owned, refresh_total};
use crate::entities::expenses;
use crate::repositories::mapping::{category_to_db, db_err, expense_from_model, expense_to_active};

async fn find_expense<C: ConnectionTrait>(
    conn: &C,
    plan_id: TravelPlanId,
    expense_id: ExpenseId,
) -> LedgerResult<Expense> {
    let model = expenses::Entity::find_by_id(expense_id.into_inner())
        .filter(expenses::Column::PlanId.eq(plan_id.into_inner()))
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| LedgerError::not_found("expense", expense_id))?;
    expense_from_model(model)
}

impl TripLedgerRepository {
    /// Records an expense against the owner's plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` for completed plans, or a validation error
    /// for a bad amount, rate, itinerary reference or a total that would no
    /// longer fit.
    pub async fn add_expense(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        input: NewExpense,
    ) -> LedgerResult<Expense> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_expense_writable(&plan)?;
        check_itinerary_ref(&txn, plan_id, input.itinerary_id).await?;
        let expense = ExpenseService::build(&plan, requester, input)?;
        ExpenseService::adjust_total(
            plan.total_cost,
            Decimal::ZERO,
            expense.amount_in_base_currency,
        )?;
        let model = expense_to_active(&expense)
            .insert(&txn)
            .await
            .map_err(db_err)?;
        let total = refresh_total(&txn, &mut plan).await?;
        commit(txn).await?;

        debug!(%plan_id, expense_id = %expense.id, %total, "Recorded expense");
        expense_from_model(model)
    }

    /// Fetches one expense of a readable plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden or the expense is missing.
    pub async fn get_expense(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        expense_id: ExpenseId,
    ) -> LedgerResult<Expense> {
        self.readable(plan_id, requester).await?;
        find_expense(&self.db, plan_id, expense_id).await
    }

    /// Lists expenses newest first, optionally by category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from the requester.
    pub async fn list_expenses(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
        filter: ExpenseFilter,
    ) -> LedgerResult<Vec<Expense>> {
        self.readable(plan_id, requester).await?;
        let mut query =
            expenses::Entity::find().filter(expenses::Column::PlanId.eq(plan_id.into_inner()));
        if let Some(category) = filter.category {
            query = query.filter(expenses::Column::Category.eq(category_to_db(category)));
        }
        query
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(expense_from_model)
            .collect()
    }

    /// Applies a partial update to an expense.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` for completed plans, or a validation error
    /// for the patched expense.
    pub async fn update_expense(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        expense_id: ExpenseId,
        patch: ExpensePatch,
    ) -> LedgerResult<Expense> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_expense_writable(&plan)?;
        check_itinerary_ref(&txn, plan_id, patch.itinerary_id).await?;
        let current = find_expense(&txn, plan_id, expense_id).await?;
        let next = ExpenseService::patched(&plan, &current, patch)?;
        ExpenseService::adjust_total(
            plan.total_cost,
            current.amount_in_base_currency,
            next.amount_in_base_currency,
        )?;
        let model = expense_to_active(&next)
            .update(&txn)
            .await
            .map_err(db_err)?;
        refresh_total(&txn, &mut plan).await?;
        commit(txn).await?;
        expense_from_model(model)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotEditable` for completed plans or `NotFound` for an
    /// unknown expense.
    pub async fn delete_expense(
        &self,
        plan_id: TravelPlanId,
        requester: UserId,
        expense_id: ExpenseId,
    ) -> LedgerResult<()> {
        let txn = self.begin().await?;
        let mut plan = lock_owned(&txn, plan_id, requester).await?;
        PlanLifecycle::ensure_expense_writable(&plan)?;
        let result = expenses::Entity::delete_by_id(expense_id.into_inner())
            .filter(expenses::Column::PlanId.eq(plan_id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::not_found("expense", expense_id));
        }
        refresh_total(&txn, &mut plan).await?;
        commit(txn).await
    }

    /// Totals by category and budget usage for a readable plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan is hidden from the requester.
    pub async fn expense_statistics(
        &self,
        plan_id: TravelPlanId,
        requester: Option<UserId>,
    ) -> LedgerResult<ExpenseStatistics> {
        let plan = self.readable(plan_id, requester).await?;
        let expenses = expenses::Entity::find()
            .filter(expenses::Column::PlanId.eq(plan_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(expense_from_model)
            .collect::<LedgerResult<Vec<_>>>()?;
        Ok(ExpenseStatistics::calculate(&plan, &expenses)?)
    }
}
