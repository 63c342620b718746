//! Travel plan routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use journey_core::plan::{NewPlan, PlanFilter, PlanPatch, TravelStatus};
use journey_shared::types::{PageRequest, TravelPlanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the travel plan routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/travel-plans", get(list_plans).post(create_plan))
        .route(
            "/travel-plans/{plan_id}",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .route("/travel-plans/{plan_id}/status", post(transition_status))
        .route("/travel-plans/{plan_id}/visibility", post(set_visibility))
        .route("/travel-plans/{plan_id}/recompute", post(recompute_totals))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing plans.
#[derive(Debug, Default, Deserialize)]
pub struct ListPlansQuery {
    /// Only plans in this status.
    pub status: Option<TravelStatus>,
    /// Case-insensitive destination substring.
    pub destination: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl ListPlansQuery {
    fn into_parts(self) -> (PlanFilter, PageRequest) {
        let defaults = PageRequest::default();
        let page = PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        };
        let filter = PlanFilter {
            status: self.status,
            destination: self.destination,
        };
        (filter, page)
    }
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// Target status.
    pub status: TravelStatus,
}

/// Request body for sharing on/off.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    /// Whether the plan is public.
    pub is_public: bool,
}

/// Response for a total recomputation.
#[derive(Debug, Serialize)]
pub struct RecomputeResponse {
    /// Plan ID.
    pub plan_id: TravelPlanId,
    /// Sum of base-currency expense amounts.
    pub total_cost: Decimal,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/travel-plans` - The caller's plans, newest first.
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListPlansQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, page) = query.into_parts();
    let plans = state.ledger.list_plans(auth.user_id(), &filter, page).await?;
    Ok(Json(plans))
}

/// POST `/travel-plans` - Create a plan in `planning`.
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewPlan>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state.ledger.create_plan(auth.user_id(), payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET `/travel-plans/{plan_id}`
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state.ledger.get_plan(plan_id, Some(auth.user_id())).await?;
    Ok(Json(plan))
}

/// PUT `/travel-plans/{plan_id}`
async fn update_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<PlanPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state
        .ledger
        .update_plan(plan_id, auth.user_id(), payload)
        .await?;
    Ok(Json(plan))
}

/// DELETE `/travel-plans/{plan_id}` - Removes the plan and everything under it.
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    state.ledger.delete_plan(plan_id, auth.user_id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/travel-plans/{plan_id}/status`
async fn transition_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state
        .ledger
        .transition_status(plan_id, auth.user_id(), payload.status)
        .await?;
    Ok(Json(plan))
}

/// POST `/travel-plans/{plan_id}/visibility`
async fn set_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let plan = state
        .ledger
        .set_visibility(plan_id, auth.user_id(), payload.is_public)
        .await?;
    info!(%plan_id, is_public = plan.is_public, "Plan visibility changed");
    Ok(Json(plan))
}

/// POST `/travel-plans/{plan_id}/recompute` - Repairs `total_cost`.
async fn recompute_totals(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    let total_cost = state
        .ledger
        .recompute_totals(plan_id, auth.user_id())
        .await?;
    Ok(Json(RecomputeResponse {
        plan_id,
        total_cost,
    }))
}
