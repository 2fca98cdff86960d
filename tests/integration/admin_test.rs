//! Integration tests for admin user management.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_user_management_is_admin_only() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("plain", "password123", "user", "staff")
        .await;
    let token = app.login("plain", "password123").await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotes_position() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("root-admin", "password123", "admin", "director")
        .await;
    let staff_id = app
        .create_test_user("climber", "password123", "user", "staff")
        .await;
    let admin_token = app.login("root-admin", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{staff_id}"),
            Some(json!({ "position": "Director" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["position"], "Director");

    // The promotion takes effect on the next request, not the next login.
    app.create_test_user("secret-keeper", "password123", "user", "director")
        .await;
    let keeper_token = app.login("secret-keeper", "password123").await;
    app.upload(&keeper_token, "directors-only.txt", "x", None, Some(3))
        .await;

    let climber_token = app.login("climber", "password123").await;
    let listing = app
        .request("GET", "/api/files", None, Some(&climber_token))
        .await;
    assert_eq!(listing.body["total"], 1);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = helpers::TestApp::new().await;
    let admin_id = app
        .create_test_user("self-admin", "password123", "admin", "director")
        .await;
    let token = app.login("self-admin", "password123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{admin_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_user_removes_their_nodes() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("hr", "password123", "admin", "director")
        .await;
    let victim_id = app
        .create_test_user("leaver", "password123", "user", "staff")
        .await;

    let admin_token = app.login("hr", "password123").await;
    let victim_token = app.login("leaver", "password123").await;

    app.upload(&victim_token, "leftover.txt", "x", None, None)
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{victim_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Their files are gone from every listing...
    let listing = app
        .request("GET", "/api/files", None, Some(&admin_token))
        .await;
    assert_eq!(listing.body["total"], 0);

    // ...and the account cannot log in again.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "leaver", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
