//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use sqlx::PgPool;

use docvault_auth::jwt::JwtDecoder;
use docvault_core::config::AppConfig;
use docvault_core::traits::blob::BlobStore;
use docvault_database::repositories::group::GroupRepository;
use docvault_database::repositories::node::NodeRepository;
use docvault_database::repositories::user::UserRepository;
use docvault_service::group::GroupService;
use docvault_service::node::{DeletionEngine, ListingService, NodeService};
use docvault_service::user::{AdminUserService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Blob storage backend
    pub blob_store: Arc<dyn BlobStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Node repository
    pub node_repo: Arc<NodeRepository>,
    /// Group repository
    pub group_repo: Arc<GroupRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Node mutation service
    pub node_service: Arc<NodeService>,
    /// Listing/search service
    pub listing_service: Arc<ListingService>,
    /// Recursive deletion engine
    pub deletion_engine: Arc<DeletionEngine>,
    /// Group tree service
    pub group_service: Arc<GroupService>,
    /// Registration/login service
    pub user_service: Arc<UserService>,
    /// Admin user management service
    pub admin_service: Arc<AdminUserService>,
}
