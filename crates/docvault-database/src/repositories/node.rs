//! Node repository — the tree store for files and folders.
//!
//! Listing and counting share the same filter builders
//! ([`push_scope_filter`] / [`push_visibility_filter`]) so the two queries
//! can never disagree about which rows are in scope.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::tree::{AncestorSource, TreeStore};
use docvault_core::types::pagination::{PageRequest, PageResponse};
use docvault_entity::node::{CreateNode, Node, NodeChanges, NodeListing};

/// The acting viewer, reduced to what the visibility predicate needs.
#[derive(Debug, Clone, Copy)]
pub struct ViewerFilter {
    /// Admins see every row.
    pub is_admin: bool,
    /// Owner override: a user always sees their own rows.
    pub user_id: Uuid,
    /// Clearance rank conferred by the viewer's position (1..=3).
    pub clearance: i32,
}

/// What a listing query is scoped to.
#[derive(Debug, Clone)]
pub enum ListScope {
    /// Direct children of a folder; `None` lists the root level.
    Children(Option<Uuid>),
    /// Global substring search across the whole accessible tree.
    Search(String),
}

/// Repository for node CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct NodeRepository {
    pool: PgPool,
}

impl NodeRepository {
    /// Create a new node repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new node row.
    pub async fn create(&self, data: &CreateNode) -> AppResult<Node> {
        sqlx::query_as::<_, Node>(
            "INSERT INTO nodes (name, kind, blob_key, size_bytes, content_type, owner_id, \
             parent_id, clearance_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.kind)
        .bind(&data.blob_key)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(data.owner_id)
        .bind(data.parent_id)
        .bind(data.clearance_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create node", e))
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))
    }

    /// Apply the mutable-field changes of a single update operation.
    pub async fn update_fields(&self, id: Uuid, changes: &NodeChanges) -> AppResult<Option<Node>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE nodes SET ");
        let mut fields = qb.separated(", ");
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(parent_id) = &changes.parent_id {
            fields
                .push("parent_id = ")
                .push_bind_unseparated(*parent_id);
        }
        if let Some(level) = changes.clearance_level {
            fields
                .push("clearance_level = ")
                .push_bind_unseparated(level);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Node>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update node", e))
    }

    /// List all nodes owned by a user (for account deletion cleanup).
    pub async fn find_owned_by(&self, owner_id: Uuid) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owned nodes", e))
    }

    /// Delete every node owned by a user. Returns the number of rows removed.
    pub async fn delete_owned_by(&self, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM nodes WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete owned nodes", e)
            })?;
        Ok(result.rows_affected())
    }

    /// One page of an access-filtered listing, with the matching total.
    ///
    /// Folders sort before files; within each kind, newest first. The count
    /// query runs the identical scope and visibility filters as the page
    /// query.
    pub async fn list_page(
        &self,
        viewer: &ViewerFilter,
        scope: &ListScope,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NodeListing>> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM nodes n WHERE 1=1");
        push_scope_filter(&mut count_qb, scope);
        push_visibility_filter(&mut count_qb, viewer);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count nodes", e))?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT n.*, u.username AS owner_name \
             FROM nodes n JOIN users u ON u.id = n.owner_id WHERE 1=1",
        );
        push_scope_filter(&mut qb, scope);
        push_visibility_filter(&mut qb, viewer);
        qb.push(" ORDER BY (n.kind = 'folder') DESC, n.created_at DESC");
        qb.push(" LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let items = qb
            .build_query_as::<NodeListing>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list nodes", e))?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

/// Restrict a listing to its scope: one folder's children, or a global
/// case-insensitive substring search on the name.
fn push_scope_filter(qb: &mut QueryBuilder<'_, Postgres>, scope: &ListScope) {
    match scope {
        ListScope::Search(term) => {
            qb.push(" AND n.name ILIKE ").push_bind(like_pattern(term));
        }
        ListScope::Children(Some(parent_id)) => {
            qb.push(" AND n.parent_id = ").push_bind(*parent_id);
        }
        ListScope::Children(None) => {
            qb.push(" AND n.parent_id IS NULL");
        }
    }
}

/// Restrict a listing to rows the viewer may see.
///
/// Mirrors `access::can_view`: owners always see their rows; otherwise the
/// deny override excludes, the allow override includes, and the clearance
/// comparison decides the rest. Admins bypass the filter entirely.
fn push_visibility_filter(qb: &mut QueryBuilder<'_, Postgres>, viewer: &ViewerFilter) {
    if viewer.is_admin {
        return;
    }
    qb.push(" AND (n.owner_id = ").push_bind(viewer.user_id);
    qb.push(" OR (NOT COALESCE(n.denied_ids, '[]'::jsonb) @> ")
        .push_bind(Json(viewer.user_id));
    qb.push(" AND (COALESCE(n.allowed_ids, '[]'::jsonb) @> ")
        .push_bind(Json(viewer.user_id));
    qb.push(" OR n.clearance_level <= ").push_bind(viewer.clearance);
    qb.push(")))");
}

/// Build an ILIKE pattern with the needle's wildcard characters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl AncestorSource for NodeRepository {
    async fn parent_of(&self, id: Uuid) -> AppResult<Option<Option<Uuid>>> {
        sqlx::query_scalar::<_, Option<Uuid>>("SELECT parent_id FROM nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find parent", e))
    }

    async fn total_count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nodes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count nodes", e))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl TreeStore<Node> for NodeRepository {
    async fn find_node(&self, id: Uuid) -> AppResult<Option<Node>> {
        self.find_by_id(id).await
    }

    async fn children_of(&self, parent_id: Uuid) -> AppResult<Vec<Node>> {
        sqlx::query_as::<_, Node>("SELECT * FROM nodes WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn remove_row(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete node", e))?;
        Ok(result.rows_affected() > 0)
    }
}
