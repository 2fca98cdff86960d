//! Group tree management — the simpler sibling of the node tree.
//!
//! Groups carry no clearance semantics; any authenticated user may browse
//! them, while every mutation is admin-only. Moves run through the same
//! cycle guard as node moves.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::repositories::group::GroupRepository;
use docvault_entity::group::{CreateGroup, Group, GroupChanges};

use crate::context::RequestContext;
use crate::node::tree::CycleGuard;

/// Manages the organizational group forest.
#[derive(Clone)]
pub struct GroupService {
    groups: Arc<GroupRepository>,
    guard: CycleGuard,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(groups: Arc<GroupRepository>, guard: CycleGuard) -> Self {
        Self { groups, guard }
    }

    /// List the direct children of a group (or the top level).
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Group>> {
        self.groups.list_children(parent_id).await
    }

    /// Create a group. Admin only.
    pub async fn create(&self, ctx: &RequestContext, req: CreateGroup) -> AppResult<Group> {
        require_admin(ctx)?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Name required"));
        }
        if let Some(parent_id) = req.parent_id {
            self.require_exists(parent_id).await?;
        }

        let group = self
            .groups
            .create(&CreateGroup {
                name: req.name.trim().to_string(),
                parent_id: req.parent_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, group_id = %group.id, "Group created");
        Ok(group)
    }

    /// Rename and/or move a group. Admin only; moves pass the cycle guard.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: GroupChanges,
    ) -> AppResult<Group> {
        require_admin(ctx)?;
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }
        if let Some(new_parent) = changes.parent_id {
            if self.guard.would_create_cycle(id, new_parent).await? {
                return Err(AppError::cycle(
                    "Cannot move a group into itself or its own subgroup",
                ));
            }
            if let Some(parent_id) = new_parent {
                self.require_exists(parent_id).await?;
            }
        }

        let group = self
            .groups
            .update_fields(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;

        info!(user_id = %ctx.user_id, group_id = %id, "Group updated");
        Ok(group)
    }

    /// Delete a group. Admin only.
    ///
    /// Child groups cascade away; member users are detached, not deleted.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(ctx)?;
        if !self.groups.delete(id).await? {
            return Err(AppError::not_found("Group not found"));
        }
        info!(user_id = %ctx.user_id, group_id = %id, "Group deleted");
        Ok(())
    }

    async fn require_exists(&self, id: Uuid) -> AppResult<()> {
        self.groups
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::validation("Parent group does not exist"))
    }
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization("Access denied. Admin only."))
    }
}
