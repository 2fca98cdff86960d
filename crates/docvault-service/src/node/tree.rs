//! Cycle guard for reparenting operations.
//!
//! The parent graph must stay a forest, and this is the only place that
//! enforces it: every move walks the proposed parent's ancestor chain
//! before the edge is rewritten.

use std::sync::Arc;

use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_core::traits::tree::AncestorSource;

/// Detects whether a proposed reparenting would introduce a cycle.
///
/// Works over any [`AncestorSource`], so the same guard protects both the
/// node tree and the group tree.
#[derive(Clone)]
pub struct CycleGuard {
    source: Arc<dyn AncestorSource>,
}

impl CycleGuard {
    /// Create a guard over the given ancestor source.
    pub fn new(source: Arc<dyn AncestorSource>) -> Self {
        Self { source }
    }

    /// Whether moving `moving` under `proposed_parent` would create a cycle.
    ///
    /// Moving to the root is always safe. Self-parenting is always a cycle.
    /// Otherwise the proposed parent's ancestor chain is walked upward until
    /// the root (safe) or `moving` (cycle) is reached. The walk is capped at
    /// the total row count: if the chain is longer than that, the graph is
    /// already malformed and the move is refused as a cycle rather than
    /// looping forever.
    pub async fn would_create_cycle(
        &self,
        moving: Uuid,
        proposed_parent: Option<Uuid>,
    ) -> AppResult<bool> {
        let Some(start) = proposed_parent else {
            return Ok(false);
        };
        if start == moving {
            return Ok(true);
        }

        let cap = self.source.total_count().await?;
        let mut current = start;
        let mut steps: u64 = 0;

        loop {
            match self.source.parent_of(current).await? {
                // Row missing: the chain is broken, nothing to cycle through.
                None => return Ok(false),
                // Reached a root.
                Some(None) => return Ok(false),
                Some(Some(parent)) => {
                    if parent == moving {
                        return Ok(true);
                    }
                    steps += 1;
                    if steps > cap {
                        return Ok(true);
                    }
                    current = parent;
                }
            }
        }
    }
}
