//! Admin-only user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use docvault_entity::user::UserChanges;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::{MessageResponse, UserSummary};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.admin_service.list_users(&auth).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// PUT /api/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    let user = state
        .admin_service
        .update_user(
            &auth,
            id,
            UserChanges {
                username: req.username,
                position: req.position,
                group_id: req.group_id,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/admin/users/:id — removes the account and all owned nodes.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.admin_service.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
