//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod expenses;
pub mod health;
pub mod itineraries;
pub mod logs;
pub mod shared;
pub mod travel_plans;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require an access token
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(travel_plans::routes())
        .merge(itineraries::routes())
        .merge(expenses::routes())
        .merge(logs::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(shared::routes())
        .merge(protected_routes)
}
