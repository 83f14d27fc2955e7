//! テスト共通ユーティリティ

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use servicepulse::{api, db, AppState};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// レスポンスの要約
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Locationヘッダー
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|value| value.to_str().ok())
    }
}

/// マイグレーション済みのインメモリDBでアプリを組み立てる
pub async fn build_app() -> (Router, SqlitePool) {
    let pool = db::migrations::initialize_database("sqlite::memory:", 1)
        .await
        .expect("Failed to create test database");
    let app = api::create_app(AppState::new(pool.clone()));
    (app, pool)
}

/// シード済みのアプリを組み立てる
pub async fn build_seeded_app() -> (Router, SqlitePool) {
    let (app, pool) = build_app().await;
    db::seed::seed_if_empty(&pool)
        .await
        .expect("Failed to seed test database");
    (app, pool)
}

async fn dispatch(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// ボディ無しのリクエスト
pub async fn send(app: &Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    dispatch(app, request).await
}

/// JSONボディ付きのリクエスト
pub async fn send_json(app: &Router, method: Method, uri: &str, payload: &Value) -> TestResponse {
    send_raw(app, method, uri, &serde_json::to_string(payload).unwrap()).await
}

/// 任意の文字列をJSONとして送る（不正JSONの検証用）
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    dispatch(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri).await
}

pub async fn post(app: &Router, uri: &str, payload: &Value) -> TestResponse {
    send_json(app, Method::POST, uri, payload).await
}

pub async fn put(app: &Router, uri: &str, payload: &Value) -> TestResponse {
    send_json(app, Method::PUT, uri, payload).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri).await
}

/// サービスを登録してIDを返す
pub async fn register_service(app: &Router, name: &str) -> i64 {
    let response = post(
        app,
        "/api/services",
        &serde_json::json!({
            "serviceName": name,
            "baseUrl": format!("http://{}.internal:8080", name.to_lowercase().replace(' ', "-")),
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["serviceId"].as_i64().unwrap()
}

/// ヘルスチェックを送信してIDを返す
pub async fn submit_check(
    app: &Router,
    service_id: i64,
    status: &str,
    response_time_ms: Option<i64>,
) -> i64 {
    let mut payload = serde_json::json!({ "status": status });
    if let Some(ms) = response_time_ms {
        payload["responseTimeMs"] = ms.into();
    }
    let response = post(
        app,
        &format!("/api/services/{}/healthchecks", service_id),
        &payload,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["healthCheckId"].as_i64().unwrap()
}

/// エラーレスポンスの検証
pub fn assert_error(response: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(response.status, status, "{}", response.body);
    assert_eq!(response.body["code"], code, "{}", response.body);
    assert!(response.body["error"].is_string());
}
