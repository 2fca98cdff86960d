//! Request DTOs.
//!
//! Update requests distinguish "field absent" from "field set to null" with
//! a double `Option`: the outer layer is presence, the inner the new value.
//! A present-but-null `parent_id` means "move to the root".

use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use docvault_entity::user::Position;

/// POST /api/auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Plaintext password; minimum length is enforced by the service.
    #[validate(length(min = 1))]
    pub password: String,
    /// Organizational position; unknown values rank as Staff.
    pub position: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// POST /api/files/folder
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder, if any.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance to view (1..=3); defaults to Staff.
    pub access_level: Option<i32>,
}

/// PUT /api/files/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNodeRequest {
    /// New name (rename).
    pub name: Option<String>,
    /// New parent (move); explicit null moves to the root.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
    /// New minimum clearance (reclassify).
    pub access_level: Option<i32>,
}

/// POST /api/groups
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent group, if any.
    pub parent_id: Option<Uuid>,
}

/// PUT /api/groups/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGroupRequest {
    /// New name.
    pub name: Option<String>,
    /// New parent; explicit null moves to the top level.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

/// PUT /api/admin/users/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New username.
    pub username: Option<String>,
    /// New position.
    pub position: Option<Position>,
    /// New group; explicit null detaches the user from any group.
    #[serde(default, deserialize_with = "double_option")]
    pub group_id: Option<Option<Uuid>>,
}

/// Deserialize a present field into `Some(value)`, where the value itself
/// may be null. Combined with `#[serde(default)]`, an absent field stays
/// `None` while `"field": null` becomes `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
