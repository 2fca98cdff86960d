//! Organizational group model.
//!
//! Groups form a forest of their own, structurally the same
//! parent-reference pattern as the node tree but with no clearance
//! semantics: they exist purely to organize principals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An organizational unit for grouping users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Parent group; `None` means top-level.
    pub parent_id: Option<Uuid>,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// Display name.
    pub name: String,
    /// Parent group, if any.
    pub parent_id: Option<Uuid>,
}

/// Admin-editable group fields.
#[derive(Debug, Clone, Default)]
pub struct GroupChanges {
    /// New display name.
    pub name: Option<String>,
    /// New parent. `Some(None)` moves the group to the top level.
    pub parent_id: Option<Option<Uuid>>,
}

impl GroupChanges {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}
