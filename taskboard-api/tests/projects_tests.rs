/// Integration tests for the project endpoints

mod common;

use axum::http::{Method, StatusCode};
use common::{create_project, create_task, create_user, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_create_project_defaults_status_to_active() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = create_user(&ctx, "Ana", "ana@x.com").await;

    let (status, body) = ctx
        .post(
            "/api/projects",
            json!({ "title": "P1", "description": "First", "user_id": user_id }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Project created successfully",
            "projectId": 1
        })
    );

    let (_, body) = ctx.get("/api/projects").await;
    let project = &body["data"][0];
    assert_eq!(project["title"], "P1");
    assert_eq!(project["description"], "First");
    assert_eq!(project["status"], "active");
    assert_eq!(project["owner_name"], "Ana");
}

#[tokio::test]
async fn test_create_project_with_explicit_status() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = create_user(&ctx, "Ana", "ana@x.com").await;

    let (status, _) = ctx
        .post(
            "/api/projects",
            json!({ "title": "P1", "user_id": user_id, "status": "on-hold" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = ctx.get("/api/projects").await;
    assert_eq!(body["data"][0]["status"], "on-hold");
}

#[tokio::test]
async fn test_create_project_missing_fields() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = create_user(&ctx, "Ana", "ana@x.com").await;

    for payload in [
        json!({ "user_id": user_id }),
        json!({ "title": "P1" }),
        json!({ "title": "", "user_id": user_id }),
    ] {
        let (status, body) = ctx.post("/api/projects", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Title and user_id are required" })
        );
    }

    assert_eq!(ctx.count("projects").await, 0);
}

#[tokio::test]
async fn test_create_project_for_unknown_user_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post("/api/projects", json!({ "title": "P1", "user_id": 42 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "User not found" }));
    assert_eq!(ctx.count("projects").await, 0);
}

#[tokio::test]
async fn test_create_project_with_negative_user_id_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post("/api/projects", json!({ "title": "P1", "user_id": -1 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "User not found" }));
    assert_eq!(ctx.count("projects").await, 0);
}

#[tokio::test]
async fn test_create_project_with_zero_user_id_is_missing() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post("/api/projects", json!({ "title": "P1", "user_id": 0 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Title and user_id are required" })
    );
}

#[tokio::test]
async fn test_create_project_with_mistyped_user_id_gets_fixed_message() {
    let ctx = TestContext::new().await.unwrap();
    create_user(&ctx, "Ana", "ana@x.com").await;

    let (status, body) = ctx
        .post("/api/projects", json!({ "title": "P1", "user_id": "1" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Title and user_id are required" })
    );
}

#[tokio::test]
async fn test_update_unknown_project_without_body_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send(Method::PUT, "/api/projects/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Project not found" }));
}

#[tokio::test]
async fn test_update_project_replaces_fields_and_keeps_owner() {
    let ctx = TestContext::new().await.unwrap();
    let ana = create_user(&ctx, "Ana", "ana@x.com").await;
    let bob = create_user(&ctx, "Bob", "bob@x.com").await;
    let project_id = create_project(&ctx, "P1", ana).await;

    let (status, body) = ctx
        .put(
            &format!("/api/projects/{project_id}"),
            json!({ "title": "P1 renamed", "status": "done", "user_id": bob }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Project updated successfully" })
    );

    let (_, body) = ctx.get("/api/projects").await;
    let project = &body["data"][0];
    assert_eq!(project["title"], "P1 renamed");
    assert_eq!(project["status"], "done");
    assert!(project["description"].is_null());
    assert_eq!(project["user_id"], ana, "owner is immutable");
}

#[tokio::test]
async fn test_update_project_without_status_writes_null() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = create_user(&ctx, "Ana", "ana@x.com").await;
    let project_id = create_project(&ctx, "P1", user_id).await;

    let (status, _) = ctx
        .put(&format!("/api/projects/{project_id}"), json!({ "title": "P1" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.get("/api/projects").await;
    assert!(body["data"][0]["status"].is_null());
}

#[tokio::test]
async fn test_update_unknown_project_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .put("/api/projects/7", json!({ "title": "X" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Project not found" }));
    assert_eq!(ctx.count("projects").await, 0);
}

#[tokio::test]
async fn test_delete_project_keeps_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = create_user(&ctx, "Ana", "ana@x.com").await;
    let project_id = create_project(&ctx, "P1", user_id).await;
    create_task(&ctx, "T1", project_id).await;

    let (status, body) = ctx.delete(&format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Project deleted successfully" })
    );

    assert_eq!(ctx.count("tasks").await, 1);
    let (_, body) = ctx.get("/api/tasks").await;
    assert_eq!(body["data"][0]["project_id"], project_id);
    assert!(body["data"][0]["project_title"].is_null());
}

#[tokio::test]
async fn test_delete_unknown_project_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.delete("/api/projects/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Project not found" }));
}
