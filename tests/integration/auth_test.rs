//! Integration tests for registration and login.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_and_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "password": "password123",
                "position": "Manager",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = app.login("alice", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("bob", "password123", "user", "staff")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "bob",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_position_defaults_to_staff() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "carol",
                "password": "password123",
                "position": "Janitor",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let token = app.login("carol", "password123").await;
    let me = app
        .request("GET", "/api/auth/users/list", None, Some(&token))
        .await;
    let carol = me
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "carol")
        .unwrap();
    assert_eq!(carol["position"], "Staff");
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("dave", "password123", "user", "staff")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "dave",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_files_require_authentication() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
