//! Request context carrying the authenticated principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::user::{Position, UserRole};

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that every
/// operation knows *who* is acting. Role and position are re-read from the
/// users table on every request rather than trusted from token claims, so a
/// demotion takes effect immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username.
    pub username: String,
    /// The user's current role.
    pub role: UserRole,
    /// The user's current position.
    pub position: Position,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, username: String, role: UserRole, position: Position) -> Self {
        Self {
            user_id,
            username,
            role,
            position,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The clearance rank conferred by the user's position.
    pub fn clearance_rank(&self) -> i32 {
        self.position.clearance_rank()
    }
}
