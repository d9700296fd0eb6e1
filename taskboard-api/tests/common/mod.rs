//! Common test utilities for integration tests
//!
//! Each `TestContext` owns a fresh in-memory store with the schema applied
//! and a router built on it, so tests never share state.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::db::pool::create_pool;
use taskboard_shared::db::schema::ensure_schema;
use tower::ServiceExt;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.database.path = ":memory:".to_string();

        let db = create_pool(config.store_config()).await?;
        ensure_schema(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request with an optional JSON body and returns status and parsed body
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        self.call(request).await
    }

    /// Sends a request with a raw JSON-typed body
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("Response was not JSON: {}", String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Row count of a table, read straight from the store
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }
}

/// Creates a user through the API and returns its id
pub async fn create_user(ctx: &TestContext, name: &str, email: &str) -> i64 {
    let (status, body) = ctx
        .post(
            "/api/users",
            serde_json::json!({ "name": name, "email": email }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create user failed: {body}");
    body["userId"].as_i64().unwrap()
}

/// Creates a project through the API and returns its id
pub async fn create_project(ctx: &TestContext, title: &str, user_id: i64) -> i64 {
    let (status, body) = ctx
        .post(
            "/api/projects",
            serde_json::json!({ "title": title, "user_id": user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create project failed: {body}");
    body["projectId"].as_i64().unwrap()
}

/// Creates a task through the API and returns its id
pub async fn create_task(ctx: &TestContext, title: &str, project_id: i64) -> i64 {
    let (status, body) = ctx
        .post(
            "/api/tasks",
            serde_json::json!({ "title": title, "project_id": project_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create task failed: {body}");
    body["taskId"].as_i64().unwrap()
}
