//! Recursive deletion engine.
//!
//! Deleting a folder removes its entire subtree. The walk happens in two
//! phases: first the subtree is collected and the acting principal's write
//! access is checked on every node, so a denial anywhere aborts before a
//! single row is touched. Then rows are deleted children-first, releasing
//! each file's blob before its row, so no surviving row ever references a
//! deleted parent.
//!
//! A blob that fails to delete is logged and its row is removed anyway:
//! a leaked blob is recoverable garbage, an undeletable file is not.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::blob::BlobStore;
use docvault_core::traits::tree::TreeStore;
use docvault_entity::node::Node;

use crate::access;
use crate::context::RequestContext;

/// Deletes whole subtrees from the node store.
#[derive(Clone)]
pub struct DeletionEngine {
    store: Arc<dyn TreeStore<Node>>,
    blobs: Arc<dyn BlobStore>,
}

impl DeletionEngine {
    /// Create a new deletion engine.
    pub fn new(store: Arc<dyn TreeStore<Node>>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Delete the node and all its descendants. Returns the number of rows
    /// removed.
    pub async fn delete_subtree(&self, ctx: &RequestContext, root_id: Uuid) -> AppResult<u64> {
        let root = self
            .store
            .find_node(root_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        let ordered = self.collect_subtree(ctx, root).await?;

        // Reverse discovery order: every node's descendants were discovered
        // after it, so walking backwards deletes children before parents.
        let mut removed = 0u64;
        for node in ordered.iter().rev() {
            if let Some(blob_key) = &node.blob_key {
                if let Err(e) = self.blobs.remove(blob_key).await {
                    warn!(
                        node_id = %node.id,
                        blob_key = %blob_key,
                        error = %e,
                        "Blob removal failed; deleting the row anyway"
                    );
                }
            }
            // A row already gone (racing delete) still counts as progress.
            if self.store.remove_row(node.id).await? {
                removed += 1;
            }
        }

        info!(
            user_id = %ctx.user_id,
            root_id = %root_id,
            removed,
            "Subtree deleted"
        );

        Ok(removed)
    }

    /// Walk the subtree depth-first, checking write access at every node.
    ///
    /// Returns nodes in discovery order (parents before their children).
    /// The walk is capped at the store's total row count so a malformed
    /// (cyclic) graph cannot loop.
    async fn collect_subtree(
        &self,
        ctx: &RequestContext,
        root: Node,
    ) -> AppResult<Vec<Node>> {
        let cap = self.store.total_count().await?;

        let mut ordered: Vec<Node> = Vec::new();
        let mut stack: Vec<Node> = vec![root];

        while let Some(node) = stack.pop() {
            if !access::can_modify(ctx, &node) {
                return Err(AppError::authorization("Access denied"));
            }
            if ordered.len() as u64 >= cap {
                return Err(AppError::internal(
                    "Subtree walk exceeded the node count; tree is malformed",
                ));
            }
            let children = self.store.children_of(node.id).await?;
            ordered.push(node);
            stack.extend(children);
        }

        Ok(ordered)
    }
}
