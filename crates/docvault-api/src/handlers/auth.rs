//! Auth handlers — register, login, user directory.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use docvault_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, RegisterResponse, UserSummary};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .register(&req.username, &req.password, req.position.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.user_service.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user.into(),
    }))
}

/// GET /api/auth/users/list — directory of all accounts for pickers.
pub async fn user_directory(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.user_service.directory(&auth).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}
