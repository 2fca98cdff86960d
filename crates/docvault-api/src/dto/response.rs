//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_core::types::pagination::PageResponse;
use docvault_entity::node::NodeListing;
use docvault_entity::user::{Position, User, UserRole};

/// Paginated file/folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePageResponse {
    /// Nodes on this page, folders first, newest first.
    pub items: Vec<NodeListing>,
    /// Total matching nodes across all pages.
    pub total: u64,
    /// Current page (1-based).
    pub page: u64,
    /// Total number of pages.
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl From<PageResponse<NodeListing>> for NodePageResponse {
    fn from(page: PageResponse<NodeListing>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

/// Response to a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Status message.
    pub message: String,
    /// The created file node's id.
    #[serde(rename = "fileId")]
    pub file_id: Uuid,
}

/// Response carrying a newly created id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Status message.
    pub message: String,
    /// The created entity's id.
    pub id: Uuid,
}

/// Plain status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Status message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response to a recursive delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Status message.
    pub message: String,
    /// How many rows were removed.
    pub removed: u64,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Account role.
    pub role: UserRole,
    /// Organizational position.
    pub position: Position,
    /// Group membership, if any.
    pub group_id: Option<Uuid>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            position: user.position,
            group_id: user.group_id,
            created_at: user.created_at,
        }
    }
}

/// Response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Status message.
    pub message: String,
    /// The new account's id.
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: UserSummary,
}
