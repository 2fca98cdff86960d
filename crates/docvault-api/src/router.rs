//! Route definitions for the DocVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use docvault_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(group_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, user directory
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/users/list", get(handlers::auth::user_directory))
}

/// File tree: listing, upload, folders, updates, deletion, blob streaming
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/folder", post(handlers::file::create_folder))
        .route("/files/{id}", put(handlers::file::update_node))
        .route("/files/{id}", delete(handlers::file::delete_node))
        .route("/files/download/{id}", get(handlers::file::download_file))
        .route("/files/preview/{id}", get(handlers::file::preview_file))
}

/// Organizational group tree
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(handlers::group::list_groups))
        .route("/groups", post(handlers::group::create_group))
        .route("/groups/{id}", put(handlers::group::update_group))
        .route("/groups/{id}", delete(handlers::group::delete_group))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", put(handlers::admin::update_user))
        .route("/admin/users/{id}", delete(handlers::admin::delete_user))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
