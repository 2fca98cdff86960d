//! Admin-only user management.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::blob::BlobStore;
use docvault_database::repositories::node::NodeRepository;
use docvault_database::repositories::user::UserRepository;
use docvault_entity::user::{User, UserChanges};

use crate::context::RequestContext;

/// Admin operations over user accounts.
#[derive(Clone)]
pub struct AdminUserService {
    users: Arc<UserRepository>,
    nodes: Arc<NodeRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<UserRepository>,
        nodes: Arc<NodeRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            users,
            nodes,
            blobs,
        }
    }

    /// List all accounts.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        require_admin(ctx)?;
        self.users.list_all().await
    }

    /// Update a user's username, position, or group membership.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UserChanges,
    ) -> AppResult<User> {
        require_admin(ctx)?;
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(username) = &changes.username {
            if username.trim().is_empty() {
                return Err(AppError::validation("Username cannot be empty"));
            }
        }

        let user = self
            .users
            .update_fields(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(admin_id = %ctx.user_id, user_id = %id, "User updated");
        Ok(user)
    }

    /// Delete an account together with every node it owns.
    ///
    /// Blobs are released first; a blob that fails to delete is logged and
    /// leaked rather than blocking the account removal. Rows owned by the
    /// user vanish in one statement; descendants owned by *other* users
    /// become unreachable orphans, which the tree tolerates.
    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(ctx)?;
        if id == ctx.user_id {
            return Err(AppError::validation("Cannot delete yourself"));
        }

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let owned = self.nodes.find_owned_by(id).await?;
        for node in &owned {
            if let Some(blob_key) = &node.blob_key {
                if let Err(e) = self.blobs.remove(blob_key).await {
                    warn!(
                        node_id = %node.id,
                        blob_key = %blob_key,
                        error = %e,
                        "Blob removal failed during account deletion"
                    );
                }
            }
        }
        let removed = self.nodes.delete_owned_by(id).await?;
        self.users.delete(id).await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %id,
            nodes_removed = removed,
            "User deleted"
        );
        Ok(())
    }
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization("Access denied. Admin only."))
    }
}
