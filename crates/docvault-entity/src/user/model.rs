//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::position::Position;
use super::role::UserRole;

/// A registered user in the DocVault system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Organizational position, determining clearance rank.
    pub position: Position,
    /// Organizational group the user belongs to, if any.
    pub group_id: Option<Uuid>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The clearance rank this user's position confers.
    pub fn clearance_rank(&self) -> i32 {
        self.position.clearance_rank()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Organizational position.
    pub position: Position,
}

/// Admin-editable user fields.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New username.
    pub username: Option<String>,
    /// New position.
    pub position: Option<Position>,
    /// New group membership. `Some(None)` detaches the user from any group.
    pub group_id: Option<Option<Uuid>>,
}

impl UserChanges {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.position.is_none() && self.group_id.is_none()
    }
}
