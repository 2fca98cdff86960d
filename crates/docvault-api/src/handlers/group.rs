//! Group tree handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use docvault_core::error::AppError;
use docvault_entity::group::{CreateGroup, Group, GroupChanges};

use crate::dto::request::{CreateGroupRequest, UpdateGroupRequest};
use crate::dto::response::{CreatedResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Scope parameter of GET /api/groups.
#[derive(Debug, Clone, Deserialize)]
pub struct ListGroupsQuery {
    /// Group whose children to list; absent lists the top level.
    pub parent_id: Option<Uuid>,
}

/// GET /api/groups?parent_id=
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListGroupsQuery>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = state.group_service.list(&auth, query.parent_id).await?;
    Ok(Json(groups))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let group = state
        .group_service
        .create(
            &auth,
            CreateGroup {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Group created".to_string(),
            id: group.id,
        }),
    ))
}

/// PUT /api/groups/:id
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .group_service
        .update(
            &auth,
            id,
            GroupChanges {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Group updated")))
}

/// DELETE /api/groups/:id
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.group_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Group deleted")))
}
