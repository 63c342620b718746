//! Profile routes for the authenticated user.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use journey_core::auth::validate_phone;
use journey_db::UserRepository;
use journey_db::entities::users;
use journey_db::repositories::UpdateProfileInput;
use journey_shared::AppError;
use journey_shared::auth::{UpdateProfileRequest, UserInfo};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me).put(update_me))
}

/// Public view of a user row. Never includes the password hash.
pub(crate) fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        full_name: user.full_name,
        phone: user.phone,
        bio: user.bio,
        avatar: user.avatar,
        is_active: user.is_active,
        is_verified: user.is_verified,
        created_at: user.created_at.into(),
    }
}

fn user_gone() -> ApiError {
    AppError::NotFound("User not found".to_string()).into()
}

/// GET /users/me - Current user's profile.
async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id().into_inner())
        .await
        .map_err(ApiError::database)?
        .ok_or_else(user_gone)?;
    Ok(Json(user_info(user)))
}

/// PUT /users/me - Update the current user's profile.
async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(phone) = payload.phone.as_deref() {
        validate_phone(phone)?;
    }

    let user = UserRepository::new((*state.db).clone())
        .update_profile(
            auth.user_id().into_inner(),
            UpdateProfileInput {
                full_name: payload.full_name,
                phone: payload.phone,
                bio: payload.bio,
                avatar: payload.avatar,
            },
        )
        .await
        .map_err(ApiError::database)?
        .ok_or_else(user_gone)?;
    Ok(Json(user_info(user)))
}
