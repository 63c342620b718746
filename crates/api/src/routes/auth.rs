//! Authentication routes for login, register, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use journey_core::auth::{
    hash_password, validate_email, validate_password, validate_phone, validate_username,
    verify_password,
};
use journey_db::UserRepository;
use journey_db::entities::users;
use journey_db::repositories::CreateUserInput;
use journey_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest};
use journey_shared::{AppError, TokenKind};
use tracing::info;

use super::users::user_info;
use crate::{AppState, error::ApiError};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// Issues a fresh token pair for `user`.
fn token_response(state: &AppState, user: users::Model) -> Result<LoginResponse, ApiError> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.username)
        .map_err(|e| ApiError::internal("Failed to generate access token", e))?;
    let refresh_token = state
        .jwt_service
        .generate_refresh_token(user.id, &user.username)
        .map_err(|e| ApiError::internal("Failed to generate refresh token", e))?;

    Ok(LoginResponse {
        user: user_info(user),
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo
        .find_by_username(payload.username.trim())
        .await
        .map_err(ApiError::database)?
    else {
        info!(username = %payload.username, "Login attempt for non-existent user");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !user.is_active {
        return Err(ApiError::unauthorized("This account has been disabled"));
    }

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::internal("Password verification error", e))?;
    if !valid {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    info!(user_id = %user.id, "User logged in successfully");
    Ok((StatusCode::OK, Json(token_response(&state, user)?)))
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_lowercase();
    validate_username(&username)?;
    validate_email(&email)?;
    validate_password(&payload.password)?;
    if let Some(phone) = payload.phone.as_deref() {
        validate_phone(phone)?;
    }

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo
        .username_exists(&username)
        .await
        .map_err(ApiError::database)?
    {
        return Err(AppError::Conflict("Username is already taken".to_string()).into());
    }
    if user_repo
        .email_exists(&email)
        .await
        .map_err(ApiError::database)?
    {
        return Err(AppError::Conflict("Email is already registered".to_string()).into());
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError::internal("Password hashing error", e))?;

    let user = user_repo
        .create(CreateUserInput {
            username,
            email,
            password_hash,
            full_name: payload.full_name,
            phone: payload.phone,
            bio: payload.bio,
        })
        .await
        .map_err(ApiError::database)?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(token_response(&state, user)?)))
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = state
        .jwt_service
        .validate_kind(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|_| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let user_repo = UserRepository::new((*state.db).clone());
    let user = user_repo
        .find_by_id(claims.user_id())
        .await
        .map_err(ApiError::database)?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::unauthorized("User no longer exists or is disabled"))?;

    Ok((StatusCode::OK, Json(token_response(&state, user)?)))
}
