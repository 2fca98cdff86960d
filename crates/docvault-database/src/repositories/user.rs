//! User repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::user::{CreateUser, User, UserChanges};

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role, position) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::validation("Username already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by name", e)
            })
    }

    /// List all users, oldest first.
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Apply admin-editable field changes.
    pub async fn update_fields(&self, id: Uuid, changes: &UserChanges) -> AppResult<Option<User>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut fields = qb.separated(", ");
        if let Some(username) = &changes.username {
            fields
                .push("username = ")
                .push_bind_unseparated(username.clone());
        }
        if let Some(position) = changes.position {
            fields
                .push("position = ")
                .push_bind_unseparated(position);
        }
        if let Some(group_id) = &changes.group_id {
            fields
                .push("group_id = ")
                .push_bind_unseparated(*group_id);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::validation("Username already exists")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update user", e),
            })
    }

    /// Delete a user row. Returns `false` if the row was already gone.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
