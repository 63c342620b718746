//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use journey_core::expense::{ExpenseFilter, ExpensePatch, NewExpense};
use journey_shared::types::{ExpenseId, TravelPlanId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/travel-plans/{plan_id}/expenses",
            get(list_expenses).post(add_expense),
        )
        .route(
            "/travel-plans/{plan_id}/expenses/statistics",
            get(expense_statistics),
        )
        .route(
            "/travel-plans/{plan_id}/expenses/{expense_id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// GET `/travel-plans/{plan_id}/expenses?category=food` - Newest first.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Query(filter): Query<ExpenseFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = state
        .ledger
        .list_expenses(plan_id, Some(auth.user_id()), filter)
        .await?;
    Ok(Json(expenses))
}

/// POST `/travel-plans/{plan_id}/expenses` - Records an expense and refreshes the plan total.
async fn add_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<NewExpense>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state
        .ledger
        .add_expense(plan_id, auth.user_id(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, expense_id)): Path<(TravelPlanId, ExpenseId)>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state
        .ledger
        .get_expense(plan_id, Some(auth.user_id()), expense_id)
        .await?;
    Ok(Json(expense))
}

async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, expense_id)): Path<(TravelPlanId, ExpenseId)>,
    Json(payload): Json<ExpensePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state
        .ledger
        .update_expense(plan_id, auth.user_id(), expense_id, payload)
        .await?;
    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, expense_id)): Path<(TravelPlanId, ExpenseId)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .delete_expense(plan_id, auth.user_id(), expense_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/travel-plans/{plan_id}/expenses/statistics` - Category totals and budget usage.
async fn expense_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .ledger
        .expense_statistics(plan_id, Some(auth.user_id()))
        .await?;
    Ok(Json(stats))
}
