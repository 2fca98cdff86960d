//! Node entity model.
//!
//! A node is either a file or a folder. Folders carry no blob; files point
//! at their physical bytes through an opaque `blob_key`. The `parent_id`
//! self-reference forms the tree; `NULL` means the node sits at the root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// Discriminates file nodes from folder nodes. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "node_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A file with physical bytes behind it.
    File,
    /// A folder; may contain other nodes.
    Folder,
}

impl NodeKind {
    /// Whether this is a folder node.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// A file or folder record in the hierarchical store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Node {
    /// Unique node identifier.
    pub id: Uuid,
    /// Display name; mutable via rename.
    pub name: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Opaque handle into the blob store. File nodes only.
    pub blob_key: Option<String>,
    /// Size of the blob in bytes; 0 for folders.
    pub size_bytes: i64,
    /// MIME type of the blob; file nodes only.
    pub content_type: Option<String>,
    /// The user who created the node. Never changes.
    pub owner_id: Uuid,
    /// Parent folder; `None` means the node sits at the root.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance rank required to view this node
    /// (1 = Staff, 2 = Manager, 3 = Director).
    pub clearance_level: i32,
    /// Optional per-node allow override: these users may view regardless of
    /// clearance. `None` means no override is set.
    pub allowed_ids: Option<Json<Vec<Uuid>>>,
    /// Optional per-node deny override: these users may never view unless
    /// they own the node or are admins.
    pub denied_ids: Option<Json<Vec<Uuid>>>,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Whether the allow override names the given user.
    pub fn allows(&self, user_id: Uuid) -> bool {
        self.allowed_ids
            .as_ref()
            .is_some_and(|ids| ids.0.contains(&user_id))
    }

    /// Whether the deny override names the given user.
    pub fn denies(&self, user_id: Uuid) -> bool {
        self.denied_ids
            .as_ref()
            .is_some_and(|ids| ids.0.contains(&user_id))
    }
}

/// Data required to create a new node record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNode {
    /// Display name.
    pub name: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Blob handle for file nodes.
    pub blob_key: Option<String>,
    /// Blob size for file nodes.
    pub size_bytes: i64,
    /// MIME type for file nodes.
    pub content_type: Option<String>,
    /// Owning user.
    pub owner_id: Uuid,
    /// Parent folder, if any.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance to view.
    pub clearance_level: i32,
}

/// Field changes applied by the single-shot update operation.
///
/// Only the fields the tree permits to change are representable: `name`
/// (rename), `parent_id` (move; the outer `Option` is presence, the inner
/// the new parent where `None` means root) and `clearance_level`
/// (reclassify).
#[derive(Debug, Clone, Default)]
pub struct NodeChanges {
    /// New display name.
    pub name: Option<String>,
    /// New parent. `Some(None)` moves the node to the root.
    pub parent_id: Option<Option<Uuid>>,
    /// New minimum clearance rank.
    pub clearance_level: Option<i32>,
}

impl NodeChanges {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.clearance_level.is_none()
    }
}

/// A node row joined with its owner's username, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NodeListing {
    /// Unique node identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Blob size in bytes; 0 for folders.
    pub size_bytes: i64,
    /// MIME type; file nodes only.
    pub content_type: Option<String>,
    /// Owning user.
    pub owner_id: Uuid,
    /// Owner's username (joined from the users table).
    pub owner_name: String,
    /// Parent folder, if any.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance rank required to view.
    pub clearance_level: i32,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
}
