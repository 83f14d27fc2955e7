//! Contract Test: POST /api/services
//!
//! サービス登録API契約テスト

use crate::support::{assert_error, build_app, get, post, send_raw};
use axum::http::{Method, StatusCode};
use serde_json::json;

/// POST /api/services - 正常系: 全フィールド指定
#[tokio::test]
async fn test_create_service_success() {
    let (app, _pool) = build_app().await;

    let response = post(
        &app,
        "/api/services",
        &json!({
            "serviceName": "Payments",
            "baseUrl": "https://payments.internal:8443",
            "description": "Card and wallet payments"
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["serviceId"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(
        response.location(),
        Some(format!("/api/services/{}", id).as_str())
    );
    assert_eq!(response.body["serviceName"], "Payments");
    assert_eq!(response.body["baseUrl"], "https://payments.internal:8443");
    assert_eq!(response.body["description"], "Card and wallet payments");
    assert!(response.body["registeredAt"].is_string());
    assert!(response.body["lastSeenAt"].is_string());

    // Locationの指す先で取得できる
    let fetched = get(&app, response.location().unwrap()).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, response.body);
}

/// POST /api/services - 正常系: 名前のみ
#[tokio::test]
async fn test_create_service_name_only() {
    let (app, _pool) = build_app().await;

    let response = post(&app, "/api/services", &json!({"serviceName": "Ledger"})).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["baseUrl"].is_null());
    assert!(response.body["description"].is_null());
}

/// POST /api/services - 異常系: 名前の重複
#[tokio::test]
async fn test_create_service_duplicate_name() {
    let (app, _pool) = build_app().await;

    let first = post(&app, "/api/services", &json!({"serviceName": "Inventory"})).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post(&app, "/api/services", &json!({"serviceName": "Inventory"})).await;
    assert_error(&second, StatusCode::CONFLICT, "CONFLICT");
    assert_eq!(
        second.body["error"],
        "Service with name 'Inventory' already exists"
    );

    // 大文字小文字が異なれば別名
    let other_case = post(&app, "/api/services", &json!({"serviceName": "inventory"})).await;
    assert_eq!(other_case.status, StatusCode::CREATED);
}

/// POST /api/services - 異常系: 入力検証
#[tokio::test]
async fn test_create_service_validation() {
    let (app, _pool) = build_app().await;

    let cases = [
        (json!({}), "Service name is required"),
        (json!({"serviceName": "   "}), "Service name is required"),
        (
            json!({"serviceName": "x".repeat(256)}),
            "Service name must be between 1 and 255 characters",
        ),
        (
            json!({"serviceName": "Billing", "baseUrl": "billing"}),
            "Base URL must be a valid URL",
        ),
        (
            json!({"serviceName": "Billing", "description": "d".repeat(1001)}),
            "Description must not exceed 1000 characters",
        ),
    ];

    for (payload, message) in cases {
        let response = post(&app, "/api/services", &payload).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        assert_eq!(response.body["error"], message);
    }

    // 何も作成されていない
    let list = get(&app, "/api/services").await;
    assert_eq!(list.body["totalCount"], 0);
}

/// POST /api/services - 異常系: 不正なJSON
#[tokio::test]
async fn test_create_service_malformed_json() {
    let (app, _pool) = build_app().await;

    let response = send_raw(&app, Method::POST, "/api/services", "{\"serviceName\": ").await;

    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}
