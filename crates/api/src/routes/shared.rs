//! Public share links.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use crate::{AppState, error::ApiError};

/// Creates the share-link routes. No authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/shared/{share_code}", get(shared_plan))
}

/// GET `/shared/{share_code}` - A public plan and its public logs.
async fn shared_plan(
    State(state): State<AppState>,
    Path(share_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let shared = state.ledger.shared_plan(&share_code).await?;
    Ok(Json(shared))
}
