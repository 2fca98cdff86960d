//! Group repository implementation.
//!
//! The group forest is the same parent-reference pattern as the node tree,
//! so this repository also implements [`AncestorSource`] and group moves go
//! through the same cycle guard.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::tree::AncestorSource;
use docvault_entity::group::{CreateGroup, Group, GroupChanges};

/// Repository for organizational groups.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new group.
    pub async fn create(&self, data: &CreateGroup) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (name, parent_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create group", e))
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// List the direct children of a group; `None` lists top-level groups.
    pub async fn list_children(&self, parent_id: Option<Uuid>) -> AppResult<Vec<Group>> {
        let query = match parent_id {
            Some(_) => "SELECT * FROM groups WHERE parent_id = $1 ORDER BY name ASC",
            None => "SELECT * FROM groups WHERE parent_id IS NULL ORDER BY name ASC",
        };
        let mut q = sqlx::query_as::<_, Group>(query);
        if let Some(parent_id) = parent_id {
            q = q.bind(parent_id);
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    /// Apply rename/move changes.
    pub async fn update_fields(
        &self,
        id: Uuid,
        changes: &GroupChanges,
    ) -> AppResult<Option<Group>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE groups SET ");
        let mut fields = qb.separated(", ");
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(parent_id) = &changes.parent_id {
            fields
                .push("parent_id = ")
                .push_bind_unseparated(*parent_id);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Group>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update group", e))
    }

    /// Delete a group row.
    ///
    /// Child groups cascade via the parent foreign key; member users are
    /// detached (not deleted) via the `SET NULL` foreign key on
    /// `users.group_id`.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AncestorSource for GroupRepository {
    async fn parent_of(&self, id: Uuid) -> AppResult<Option<Option<Uuid>>> {
        sqlx::query_scalar::<_, Option<Uuid>>("SELECT parent_id FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find parent", e))
    }

    async fn total_count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count groups", e))?;
        Ok(count as u64)
    }
}
