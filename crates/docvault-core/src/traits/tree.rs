//! Tree store contract for the self-referential node hierarchies.
//!
//! Both the file tree and the organizational group tree are forests stored
//! as rows with a nullable `parent_id`. The traits here capture exactly what
//! the cycle guard and the recursive deletion engine need, so those
//! components can be exercised against an in-memory store in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Parent-chain lookups over a forest of rows.
///
/// The cycle guard only ever walks upward, so this is the entire surface it
/// requires. Implemented by every repository that stores a `parent_id` edge.
#[async_trait]
pub trait AncestorSource: Send + Sync + 'static {
    /// Return the parent reference of the given row.
    ///
    /// `None` means the row does not exist; `Some(None)` means the row is a
    /// root; `Some(Some(id))` is the parent's id.
    async fn parent_of(&self, id: Uuid) -> AppResult<Option<Option<Uuid>>>;

    /// Total number of rows in the forest. Used as the upper bound for
    /// ancestor walks so a malformed (already cyclic) graph still terminates.
    async fn total_count(&self) -> AppResult<u64>;
}

/// Row-level tree store contract used by the recursive deletion engine.
///
/// Generic over the entity type so each forest gets a strongly typed store;
/// entity-specific queries live on the concrete repository structs.
#[async_trait]
pub trait TreeStore<N>: AncestorSource
where
    N: Send + Sync + 'static,
{
    /// Fetch a single row by id.
    async fn find_node(&self, id: Uuid) -> AppResult<Option<N>>;

    /// Fetch the direct children of a row.
    async fn children_of(&self, parent_id: Uuid) -> AppResult<Vec<N>>;

    /// Delete a single row. Returns `false` if the row was already gone,
    /// which callers treat as success so racing deletes converge.
    async fn remove_row(&self, id: Uuid) -> AppResult<bool>;
}
