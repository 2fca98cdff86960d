//! Integration tests for the organizational group tree.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_group_mutations_are_admin_only() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("regular", "password123", "user", "staff")
        .await;
    let token = app.login("regular", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Engineering" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Browsing is open to any authenticated user.
    let response = app.request("GET", "/api/groups", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_group_tree_lifecycle() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("hr-admin", "password123", "admin", "director")
        .await;
    let token = app.login("hr-admin", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Engineering" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let engineering = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Platform", "parent_id": engineering })),
            Some(&token),
        )
        .await;
    let platform = response.body["id"].as_str().unwrap().to_string();

    // Children are scoped to their parent.
    let top = app.request("GET", "/api/groups", None, Some(&token)).await;
    assert_eq!(top.body.as_array().unwrap().len(), 1);
    let children = app
        .request(
            "GET",
            &format!("/api/groups?parent_id={engineering}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(children.body.as_array().unwrap().len(), 1);
    assert_eq!(children.body[0]["name"], "Platform");

    // The same cycle guard protects group moves.
    let response = app
        .request(
            "PUT",
            &format!("/api/groups/{engineering}"),
            Some(json!({ "parent_id": platform })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CYCLE");

    // Deleting the parent cascades to child groups.
    let response = app
        .request(
            "DELETE",
            &format!("/api/groups/{engineering}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let top = app.request("GET", "/api/groups", None, Some(&token)).await;
    assert_eq!(top.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_group_deletion_detaches_members() {
    let app = helpers::TestApp::new().await;
    let admin_id = app
        .create_test_user("org-admin", "password123", "admin", "director")
        .await;
    let member_id = app
        .create_test_user("member", "password123", "user", "staff")
        .await;
    let _ = admin_id;
    let token = app.login("org-admin", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Doomed" })),
            Some(&token),
        )
        .await;
    let group_id = response.body["id"].as_str().unwrap().to_string();

    // Put the member into the group, then delete the group.
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{member_id}"),
            Some(json!({ "group_id": group_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.request(
        "DELETE",
        &format!("/api/groups/{group_id}"),
        None,
        Some(&token),
    )
    .await;

    // The member survives, detached.
    let users = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    let member = users
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "member")
        .expect("member account must survive group deletion");
    assert_eq!(member["group_id"], serde_json::Value::Null);
}
