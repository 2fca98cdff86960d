//! DocVault server — clearance-gated file storage and organization.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::traits::blob::BlobStore;
use docvault_core::traits::tree::{AncestorSource, TreeStore};
use docvault_entity::node::Node;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOCVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = docvault_database::connection::create_pool(&config.database).await?;
    docvault_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Blob storage ─────────────────────────────────────
    let blob_store: Arc<dyn BlobStore> = Arc::new(
        docvault_storage::LocalBlobStore::new(&config.storage.local.root_path).await?,
    );
    tracing::info!(root = %config.storage.local.root_path, "Blob storage initialized");

    // ── Step 3: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(docvault_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let node_repo = Arc::new(docvault_database::repositories::node::NodeRepository::new(
        db_pool.clone(),
    ));
    let group_repo = Arc::new(docvault_database::repositories::group::GroupRepository::new(
        db_pool.clone(),
    ));

    // ── Step 4: Auth machinery ───────────────────────────────────
    let password_hasher = docvault_auth::password::PasswordHasher::new();
    let jwt_encoder = Arc::new(docvault_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(docvault_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Step 5: Services ─────────────────────────────────────────
    let node_guard = docvault_service::node::CycleGuard::new(
        Arc::clone(&node_repo) as Arc<dyn AncestorSource>
    );
    let group_guard = docvault_service::node::CycleGuard::new(
        Arc::clone(&group_repo) as Arc<dyn AncestorSource>
    );

    let node_service = Arc::new(docvault_service::node::NodeService::new(
        Arc::clone(&node_repo),
        Arc::clone(&blob_store),
        node_guard,
    ));
    let listing_service = Arc::new(docvault_service::node::ListingService::new(Arc::clone(
        &node_repo,
    )));
    let deletion_engine = Arc::new(docvault_service::node::DeletionEngine::new(
        Arc::clone(&node_repo) as Arc<dyn TreeStore<Node>>,
        Arc::clone(&blob_store),
    ));
    let group_service = Arc::new(docvault_service::group::GroupService::new(
        Arc::clone(&group_repo),
        group_guard,
    ));
    let user_service = Arc::new(docvault_service::user::UserService::new(
        Arc::clone(&user_repo),
        password_hasher.clone(),
        Arc::clone(&jwt_encoder),
        config.auth.password_min_length,
    ));
    let admin_service = Arc::new(docvault_service::user::AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&node_repo),
        Arc::clone(&blob_store),
    ));

    // ── Step 6: Bootstrap admin account ──────────────────────────
    user_service.ensure_default_admin().await?;

    // ── Step 7: Build and start HTTP server ──────────────────────
    let app_state = docvault_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        blob_store,
        jwt_decoder,
        user_repo,
        node_repo,
        group_repo,
        node_service,
        listing_service,
        deletion_engine,
        group_service,
        user_service,
        admin_service,
    };

    let app = docvault_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("DocVault server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("DocVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
