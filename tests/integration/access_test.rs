//! Integration tests for clearance-gated visibility.
//!
//! Exercises the end-to-end scenario: P1 (Staff) owns a Manager-clearance
//! folder; P2 (Staff) must not see it, P3 (Manager) must, and deletion
//! removes it from everyone's listings.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_clearance_scenario() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("p1", "password123", "user", "staff")
        .await;
    app.create_test_user("p2", "password123", "user", "staff")
        .await;
    app.create_test_user("p3", "password123", "user", "manager")
        .await;

    let p1 = app.login("p1", "password123").await;
    let p2 = app.login("p2", "password123").await;
    let p3 = app.login("p3", "password123").await;

    // P1 creates "Reports" with Manager clearance at the root.
    let response = app
        .request(
            "POST",
            "/api/files/folder",
            Some(json!({ "name": "Reports", "access_level": 2 })),
            Some(&p1),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let reports = response.body["id"].as_str().unwrap().to_string();

    // Owner sees it despite Staff clearance.
    let listing = app.request("GET", "/api/files", None, Some(&p1)).await;
    assert_eq!(listing.body["total"], 1);

    // A Staff non-owner does not.
    let listing = app.request("GET", "/api/files", None, Some(&p2)).await;
    assert_eq!(listing.body["total"], 0);

    // A Manager non-owner does.
    let listing = app.request("GET", "/api/files", None, Some(&p3)).await;
    assert_eq!(listing.body["total"], 1);

    // Moving "Reports" into itself fails with the cycle error.
    let response = app
        .request(
            "PUT",
            &format!("/api/files/{reports}"),
            Some(json!({ "parent_id": reports })),
            Some(&p1),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CYCLE");

    // Deleting "Reports" removes it from every principal's listings.
    let response = app
        .request("DELETE", &format!("/api/files/{reports}"), None, Some(&p1))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    for token in [&p1, &p2, &p3] {
        let listing = app.request("GET", "/api/files", None, Some(token)).await;
        assert_eq!(listing.body["total"], 0);
    }
}

#[tokio::test]
async fn test_admin_sees_everything() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("creator", "password123", "user", "staff")
        .await;
    app.create_test_user("boss", "password123", "admin", "staff")
        .await;

    let creator = app.login("creator", "password123").await;
    let boss = app.login("boss", "password123").await;

    app.request(
        "POST",
        "/api/files/folder",
        Some(json!({ "name": "Top secret", "access_level": 3 })),
        Some(&creator),
    )
    .await;

    // Admin position is only Staff, but role wins.
    let listing = app.request("GET", "/api/files", None, Some(&boss)).await;
    assert_eq!(listing.body["total"], 1);
}

#[tokio::test]
async fn test_download_respects_clearance() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("uploader", "password123", "user", "director")
        .await;
    app.create_test_user("lowly", "password123", "user", "staff")
        .await;

    let uploader = app.login("uploader", "password123").await;
    let lowly = app.login("lowly", "password123").await;

    let uploaded = app
        .upload(&uploader, "board-minutes.txt", "secret", None, Some(3))
        .await;
    let file_id = uploaded.body["fileId"].as_str().unwrap().to_string();

    let response = app
        .request(
            "GET",
            &format!("/api/files/download/{file_id}"),
            None,
            Some(&lowly),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "GET",
            &format!("/api/files/download/{file_id}"),
            None,
            Some(&uploader),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_is_access_filtered() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("writer", "password123", "user", "director")
        .await;
    app.create_test_user("reader", "password123", "user", "staff")
        .await;

    let writer = app.login("writer", "password123").await;
    let reader = app.login("reader", "password123").await;

    app.upload(&writer, "plan-public.txt", "x", None, Some(1)).await;
    app.upload(&writer, "plan-secret.txt", "x", None, Some(3)).await;

    let results = app
        .request("GET", "/api/files?search=plan", None, Some(&reader))
        .await;
    assert_eq!(results.body["total"], 1);
    assert_eq!(results.body["items"][0]["name"], "plan-public.txt");
}
