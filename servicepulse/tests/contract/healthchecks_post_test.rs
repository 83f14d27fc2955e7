//! Contract Test: POST /api/services/:id/healthchecks
//!
//! ヘルスチェック送信API契約テスト

use crate::support::{assert_error, build_app, get, post, register_service, send_raw};
use axum::http::{Method, StatusCode};
use serde_json::json;

/// 正常系: 詳細付きで送信し、サービスの最終確認時刻が更新される
#[tokio::test]
async fn test_submit_health_check_success() {
    let (app, _pool) = build_app().await;
    let service_id = register_service(&app, "Edge Proxy").await;

    let response = post(
        &app,
        &format!("/api/services/{}/healthchecks", service_id),
        &json!({
            "status": "Degraded",
            "responseTimeMs": 730,
            "details": {"cpu": 93.5, "pool": {"idle": 0}}
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["healthCheckId"].as_i64().unwrap();
    assert_eq!(
        response.location(),
        Some(format!("/api/healthchecks/{}", id).as_str())
    );
    assert_eq!(response.body["serviceId"], service_id);
    assert_eq!(response.body["serviceName"], "Edge Proxy");
    assert_eq!(response.body["status"], "Degraded");
    assert_eq!(response.body["responseTimeMs"], 730);
    assert_eq!(response.body["details"]["pool"]["idle"], 0);

    let service = get(&app, &format!("/api/services/{}", service_id)).await;
    assert_eq!(service.body["lastSeenAt"], response.body["checkedAt"]);

    let fetched = get(&app, response.location().unwrap()).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, response.body);
}

/// 正常系: 状態のみ
#[tokio::test]
async fn test_submit_health_check_status_only() {
    let (app, _pool) = build_app().await;
    let service_id = register_service(&app, "Cron").await;

    let response = post(
        &app,
        &format!("/api/services/{}/healthchecks", service_id),
        &json!({"status": "Healthy"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["responseTimeMs"].is_null());
    assert!(response.body["details"].is_null());
}

/// 異常系: 存在しないサービス
#[tokio::test]
async fn test_submit_health_check_unknown_service() {
    let (app, _pool) = build_app().await;

    let response = post(
        &app,
        "/api/services/404/healthchecks",
        &json!({"status": "Healthy"}),
    )
    .await;

    assert_error(&response, StatusCode::NOT_FOUND, "SERVICE_NOT_FOUND");
    let all = get(&app, "/api/healthchecks").await;
    assert!(all.body.as_array().unwrap().is_empty());
}

/// 異常系: 入力検証
#[tokio::test]
async fn test_submit_health_check_validation() {
    let (app, _pool) = build_app().await;
    let service_id = register_service(&app, "Indexer").await;
    let uri = format!("/api/services/{}/healthchecks", service_id);

    let cases = [
        (json!({}), "Status is required"),
        (
            json!({"status": "Unknown"}),
            "Status must be 'Healthy', 'Degraded', or 'Unhealthy'",
        ),
        (
            json!({"status": "healthy"}),
            "Status must be 'Healthy', 'Degraded', or 'Unhealthy'",
        ),
        (
            json!({"status": "Healthy", "responseTimeMs": -5}),
            "Response time must be non-negative",
        ),
    ];

    for (payload, message) in cases {
        let response = post(&app, &uri, &payload).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        assert_eq!(response.body["error"], message);
    }

    let wrong_type = post(&app, &uri, &json!({"status": "Healthy", "details": [1, 2]})).await;
    assert_error(&wrong_type, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    let malformed = send_raw(&app, Method::POST, &uri, "{status:").await;
    assert_error(&malformed, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");

    // 失敗した送信は記録されない
    let summary = get(&app, &format!("/api/services/{}/health", service_id)).await;
    assert_eq!(summary.body["totalHealthChecks"], 0);
}
