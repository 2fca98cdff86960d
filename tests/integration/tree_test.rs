//! Integration tests for cycle-safe moves and recursive deletion.

mod helpers;

use http::StatusCode;
use serde_json::json;

async fn create_folder(
    app: &helpers::TestApp,
    token: &str,
    name: &str,
    parent_id: Option<&str>,
) -> String {
    let mut body = json!({ "name": name });
    if let Some(parent_id) = parent_id {
        body["parent_id"] = json!(parent_id);
    }
    let response = app
        .request("POST", "/api/files/folder", Some(body), Some(token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_self_move_rejected_as_cycle() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("mover", "password123", "user", "staff")
        .await;
    let token = app.login("mover", "password123").await;

    let a = create_folder(&app, &token, "A", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{a}"),
            Some(json!({ "parent_id": a })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CYCLE");
}

#[tokio::test]
async fn test_deep_cycle_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("deep", "password123", "user", "staff")
        .await;
    let token = app.login("deep", "password123").await;

    // A contains B contains C.
    let a = create_folder(&app, &token, "A", None).await;
    let b = create_folder(&app, &token, "B", Some(&a)).await;
    let c = create_folder(&app, &token, "C", Some(&b)).await;

    // Moving A under its grandchild must fail with the cycle error.
    let response = app
        .request(
            "PUT",
            &format!("/api/files/{a}"),
            Some(json!({ "parent_id": c })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CYCLE");

    // And the forest is untouched: A is still listed at the root.
    let root = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(root.body["total"], 1);
    assert_eq!(root.body["items"][0]["name"], "A");
}

#[tokio::test]
async fn test_legitimate_moves_allowed() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("shuffler", "password123", "user", "staff")
        .await;
    let token = app.login("shuffler", "password123").await;

    let a = create_folder(&app, &token, "A", None).await;
    let b = create_folder(&app, &token, "B", Some(&a)).await;

    // Move B to the root with an explicit null parent.
    let response = app
        .request(
            "PUT",
            &format!("/api/files/{b}"),
            Some(json!({ "parent_id": null })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let root = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(root.body["total"], 2);

    // And back under A again.
    let response = app
        .request(
            "PUT",
            &format!("/api/files/{b}"),
            Some(json!({ "parent_id": a })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_move_under_file_rejected() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("misfiler", "password123", "user", "staff")
        .await;
    let token = app.login("misfiler", "password123").await;

    let folder = create_folder(&app, &token, "Folder", None).await;
    let uploaded = app.upload(&token, "leaf.txt", "x", None, None).await;
    let file_id = uploaded.body["fileId"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{folder}"),
            Some(json!({ "parent_id": file_id })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_recursive_delete_removes_whole_subtree() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("reaper", "password123", "user", "staff")
        .await;
    let token = app.login("reaper", "password123").await;

    // F contains G contains file X; plus an unrelated sibling.
    let f = create_folder(&app, &token, "F", None).await;
    let g = create_folder(&app, &token, "G", Some(&f)).await;
    let uploaded = app.upload(&token, "x.txt", "bytes", None, None).await;
    let x = uploaded.body["fileId"].as_str().unwrap().to_string();
    app.request(
        "PUT",
        &format!("/api/files/{x}"),
        Some(json!({ "parent_id": g })),
        Some(&token),
    )
    .await;
    create_folder(&app, &token, "Survivor", None).await;

    let response = app
        .request("DELETE", &format!("/api/files/{f}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["removed"], 3);

    // Only the sibling remains anywhere in the tree.
    let root = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(root.body["total"], 1);
    assert_eq!(root.body["items"][0]["name"], "Survivor");

    let search = app
        .request("GET", "/api/files?search=x.txt", None, Some(&token))
        .await;
    assert_eq!(search.body["total"], 0);
}

#[tokio::test]
async fn test_recursive_delete_denied_for_mixed_ownership() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("parent-owner", "password123", "user", "staff")
        .await;
    let admin = app
        .create_test_user("site-admin", "password123", "admin", "director")
        .await;
    let _ = admin;
    let owner_token = app.login("parent-owner", "password123").await;
    let admin_token = app.login("site-admin", "password123").await;

    let f = create_folder(&app, &owner_token, "Shared", None).await;
    // The admin plants a file inside the owner's folder.
    app.upload(
        &admin_token,
        "admins-file.txt",
        "x",
        Some(f.parse().unwrap()),
        None,
    )
    .await;

    // The folder owner cannot delete a subtree containing a foreign node...
    let response = app
        .request("DELETE", &format!("/api/files/{f}"), None, Some(&owner_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // ...and nothing was deleted.
    let listing = app
        .request(
            "GET",
            &format!("/api/files?parent_id={f}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(listing.body["total"], 1);

    // The admin can.
    let response = app
        .request("DELETE", &format!("/api/files/{f}"), None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["removed"], 2);
}
