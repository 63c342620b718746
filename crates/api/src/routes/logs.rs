//! Travel log routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use journey_core::travel_log::{LogPatch, NewLog};
use journey_shared::types::{TravelLogId, TravelPlanId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the log routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/travel-plans/{plan_id}/logs",
            get(visible_logs).post(add_log),
        )
        .route(
            "/travel-plans/{plan_id}/logs/{log_id}",
            get(get_log).put(update_log).delete(delete_log),
        )
}

/// GET `/travel-plans/{plan_id}/logs` - Only the logs the caller may read.
async fn visible_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = state
        .ledger
        .visible_logs(plan_id, Some(auth.user_id()))
        .await?;
    Ok(Json(logs))
}

async fn add_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<NewLog>,
) -> Result<impl IntoResponse, ApiError> {
    let log = state
        .ledger
        .add_log(plan_id, auth.user_id(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET `/travel-plans/{plan_id}/logs/{log_id}` - Hidden logs read as missing.
async fn get_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, log_id)): Path<(TravelPlanId, TravelLogId)>,
) -> Result<impl IntoResponse, ApiError> {
    let log = state
        .ledger
        .get_log(plan_id, Some(auth.user_id()), log_id)
        .await?;
    Ok(Json(log))
}

async fn update_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, log_id)): Path<(TravelPlanId, TravelLogId)>,
    Json(payload): Json<LogPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let log = state
        .ledger
        .update_log(plan_id, auth.user_id(), log_id, payload)
        .await?;
    Ok(Json(log))
}

async fn delete_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, log_id)): Path<(TravelPlanId, TravelLogId)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .delete_log(plan_id, auth.user_id(), log_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
