//! Node mutation operations and blob-backed reads.
//!
//! Every mutation is a single-shot transition on one node: create, rename,
//! move, reclassify. Moves pass through the cycle guard before the parent
//! edge is rewritten. Deletion lives in [`super::deletion`].

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::blob::{BlobStore, ByteStream};
use docvault_database::repositories::node::NodeRepository;
use docvault_entity::node::{CreateNode, Node, NodeChanges, NodeKind};

use crate::access;
use crate::context::RequestContext;
use crate::node::tree::CycleGuard;

/// Lowest clearance rank; the default for new nodes.
const DEFAULT_CLEARANCE: i32 = 1;
/// Highest clearance rank.
const MAX_CLEARANCE: i32 = 3;

/// Request to create a folder node.
#[derive(Debug, Clone)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder, if any.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance to view; defaults to Staff.
    pub clearance_level: Option<i32>,
}

/// Request to store an uploaded file.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// The file bytes.
    pub data: Bytes,
    /// Parent folder, if any.
    pub parent_id: Option<Uuid>,
    /// Minimum clearance to view; defaults to Staff.
    pub clearance_level: Option<i32>,
}

/// A blob ready to stream back to the client.
pub struct BlobContent {
    /// The file node the blob belongs to.
    pub node: Node,
    /// The blob's byte stream.
    pub stream: ByteStream,
}

/// Manages node creation, updates, and blob-backed reads.
#[derive(Clone)]
pub struct NodeService {
    nodes: Arc<NodeRepository>,
    blobs: Arc<dyn BlobStore>,
    guard: CycleGuard,
}

impl NodeService {
    /// Creates a new node service.
    pub fn new(nodes: Arc<NodeRepository>, blobs: Arc<dyn BlobStore>, guard: CycleGuard) -> Self {
        Self {
            nodes,
            blobs,
            guard,
        }
    }

    /// Creates a folder. The principal becomes the owner.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Node> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name required"));
        }
        let clearance_level = validate_clearance(req.clearance_level)?;
        self.require_folder_parent(req.parent_id).await?;

        let folder = self
            .nodes
            .create(&CreateNode {
                name: name.to_string(),
                kind: NodeKind::Folder,
                blob_key: None,
                size_bytes: 0,
                content_type: None,
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
                clearance_level,
            })
            .await?;

        info!(user_id = %ctx.user_id, node_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Stores an uploaded file: bytes first, then the row.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> AppResult<Node> {
        let name = req.file_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("No file uploaded"));
        }
        let clearance_level = validate_clearance(req.clearance_level)?;
        self.require_folder_parent(req.parent_id).await?;

        // Keys are opaque to the store; the tree row is their only owner.
        let blob_key = Uuid::new_v4().simple().to_string();
        let size_bytes = self.blobs.put(&blob_key, req.data).await? as i64;

        let node = match self
            .nodes
            .create(&CreateNode {
                name: name.to_string(),
                kind: NodeKind::File,
                blob_key: Some(blob_key.clone()),
                size_bytes,
                content_type: req.content_type,
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
                clearance_level,
            })
            .await
        {
            Ok(node) => node,
            Err(e) => {
                // Row insert failed after the bytes landed; reclaim the blob.
                let _ = self.blobs.remove(&blob_key).await;
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            node_id = %node.id,
            size_bytes,
            "File uploaded"
        );
        Ok(node)
    }

    /// Applies a single-shot update: rename, move, reclassify, or any
    /// combination.
    ///
    /// Write access denial answers "not found", matching what callers can
    /// observe anyway (they cannot distinguish a hidden row from a missing
    /// one). Moves that would create a cycle fail with a cycle error
    /// distinct from plain validation, self-moves included.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: NodeChanges,
    ) -> AppResult<Node> {
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }

        let node = self
            .nodes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found or access denied"))?;
        if !access::can_modify(ctx, &node) {
            return Err(AppError::not_found("Item not found or access denied"));
        }

        if let Some(name) = &changes.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }
        if let Some(level) = changes.clearance_level {
            validate_clearance(Some(level))?;
        }
        if let Some(new_parent) = changes.parent_id {
            if self.guard.would_create_cycle(id, new_parent).await? {
                return Err(AppError::cycle(
                    "Cannot move an item into itself or its own subfolder",
                ));
            }
            self.require_folder_parent(new_parent).await?;
        }

        let updated = self
            .nodes
            .update_fields(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found or access denied"))?;

        info!(user_id = %ctx.user_id, node_id = %id, "Node updated");
        Ok(updated)
    }

    /// Opens a file's blob for download/preview, enforcing read access.
    pub async fn open_blob(&self, ctx: &RequestContext, id: Uuid) -> AppResult<BlobContent> {
        let node = self
            .nodes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !access::can_view(ctx, &node) {
            return Err(AppError::authorization("Access denied"));
        }

        let blob_key = match (&node.kind, &node.blob_key) {
            (NodeKind::File, Some(key)) => key.clone(),
            _ => return Err(AppError::validation("Not a downloadable file")),
        };

        let stream = self.blobs.open(&blob_key).await?;
        Ok(BlobContent { node, stream })
    }

    /// Reject parents that are missing or not folders.
    async fn require_folder_parent(&self, parent_id: Option<Uuid>) -> AppResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let parent = self.nodes.find_by_id(parent_id).await?;
        match parent {
            Some(node) if node.is_folder() => Ok(()),
            Some(_) => Err(AppError::validation("Parent must be a folder")),
            None => Err(AppError::validation("Parent folder does not exist")),
        }
    }
}

/// Clearance levels are ranks 1..=3; absent means Staff.
fn validate_clearance(level: Option<i32>) -> AppResult<i32> {
    match level {
        None => Ok(DEFAULT_CLEARANCE),
        Some(level) if (DEFAULT_CLEARANCE..=MAX_CLEARANCE).contains(&level) => Ok(level),
        Some(level) => Err(AppError::validation(format!(
            "Invalid access level: {level}. Expected 1 (Staff), 2 (Manager), or 3 (Director)"
        ))),
    }
}
