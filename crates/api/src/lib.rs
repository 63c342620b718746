//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use journey_core::travel_log::FriendshipOracle;
use journey_db::TripLedgerRepository;
use journey_shared::JwtService;
use journey_shared::config::LedgerConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Trip ledger backed by the same pool.
    pub ledger: TripLedgerRepository,
}

impl AppState {
    /// Builds the state from a connection, token service and ledger settings.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        jwt_service: JwtService,
        ledger_config: &LedgerConfig,
        friendships: Arc<dyn FriendshipOracle>,
    ) -> Self {
        let ledger =
            TripLedgerRepository::new(db.clone(), ledger_config.default_currency, friendships);
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            ledger,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
