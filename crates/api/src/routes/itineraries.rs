//! Itinerary routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use journey_core::itinerary::{ItineraryPatch, NewItinerary};
use journey_shared::types::{ItineraryId, TravelPlanId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the itinerary routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/travel-plans/{plan_id}/itineraries",
            get(list_itineraries).post(add_itinerary),
        )
        .route(
            "/travel-plans/{plan_id}/itineraries/{itinerary_id}",
            get(get_itinerary)
                .put(update_itinerary)
                .delete(delete_itinerary),
        )
}

/// GET `/travel-plans/{plan_id}/itineraries` - Items in schedule order.
async fn list_itineraries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .ledger
        .list_itineraries(plan_id, Some(auth.user_id()))
        .await?;
    Ok(Json(items))
}

async fn add_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<TravelPlanId>,
    Json(payload): Json<NewItinerary>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .ledger
        .add_itinerary(plan_id, auth.user_id(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, itinerary_id)): Path<(TravelPlanId, ItineraryId)>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .ledger
        .get_itinerary(plan_id, Some(auth.user_id()), itinerary_id)
        .await?;
    Ok(Json(item))
}

async fn update_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, itinerary_id)): Path<(TravelPlanId, ItineraryId)>,
    Json(payload): Json<ItineraryPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .ledger
        .update_itinerary(plan_id, auth.user_id(), itinerary_id, payload)
        .await?;
    Ok(Json(item))
}

/// DELETE - Linked expenses and logs are kept and detached.
async fn delete_itinerary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((plan_id, itinerary_id)): Path<(TravelPlanId, ItineraryId)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .delete_itinerary(plan_id, auth.user_id(), itinerary_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
