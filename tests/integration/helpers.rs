//! Shared test helpers for integration tests.
//!
//! Requires the disposable Postgres named in `config/test.toml`; every
//! `TestApp::new()` wipes its tables.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use docvault_core::config::AppConfig;
use docvault_core::traits::blob::BlobStore;
use docvault_core::traits::tree::{AncestorSource, TreeStore};
use docvault_entity::node::Node;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = docvault_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        docvault_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let blob_store: Arc<dyn BlobStore> = Arc::new(
            docvault_storage::LocalBlobStore::new(&config.storage.local.root_path)
                .await
                .expect("Failed to init blob store"),
        );

        let user_repo = Arc::new(docvault_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let node_repo = Arc::new(docvault_database::repositories::node::NodeRepository::new(
            db_pool.clone(),
        ));
        let group_repo = Arc::new(
            docvault_database::repositories::group::GroupRepository::new(db_pool.clone()),
        );

        let password_hasher = docvault_auth::password::PasswordHasher::new();
        let jwt_encoder = Arc::new(docvault_auth::jwt::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(docvault_auth::jwt::JwtDecoder::new(&config.auth));

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

        let router = docvault_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        for table in ["nodes", "users", "groups"] {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user directly and return their ID
    pub async fn create_test_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
        position: &str,
    ) -> Uuid {
        let hasher = docvault_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role, position) \
             VALUES ($1, $2, $3, $4::user_role, $5::user_position)",
        )
        .bind(id)
        .bind(username)
        .bind(&hash)
        .bind(role)
        .bind(position)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Login and return a bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a small file through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        content: &str,
        parent_id: Option<Uuid>,
        access_level: Option<i32>,
    ) -> TestResponse {
        let boundary = "----docvault-test-boundary";
        let mut body = String::new();

        if let Some(parent_id) = parent_id {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"parent_id\"\r\n\r\n{parent_id}\r\n"
            ));
        }
        if let Some(level) = access_level {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"access_level\"\r\n\r\n{level}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n{content}\r\n--{boundary}--\r\n"
        ));

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
