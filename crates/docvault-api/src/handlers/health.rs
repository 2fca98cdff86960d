//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/health — liveness plus a database ping.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = docvault_database::connection::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
    }))
}
