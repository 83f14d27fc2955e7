//! Contract Test: DELETE /api/services/:id
//!
//! サービス削除API契約テスト

use crate::support::{
    assert_error, build_app, build_seeded_app, delete, get, register_service, submit_check,
};
use axum::http::StatusCode;

/// DELETE /api/services/:id - 正常系: ヘルスチェックも削除される
#[tokio::test]
async fn test_delete_service_cascades_health_checks() {
    let (app, _pool) = build_app().await;
    let id = register_service(&app, "Thumbnailer").await;
    let check_id = submit_check(&app, id, "Healthy", Some(12)).await;

    let response = delete(&app, &format!("/api/services/{}", id)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    let service = get(&app, &format!("/api/services/{}", id)).await;
    assert_eq!(service.status, StatusCode::NOT_FOUND);

    let check = get(&app, &format!("/api/healthchecks/{}", check_id)).await;
    assert_error(&check, StatusCode::NOT_FOUND, "HEALTH_CHECK_NOT_FOUND");
}

/// DELETE /api/services/:id - 異常系: 存在しないID（2回目の削除）
#[tokio::test]
async fn test_delete_service_not_found() {
    let (app, _pool) = build_app().await;
    let id = register_service(&app, "Exporter").await;

    let first = delete(&app, &format!("/api/services/{}", id)).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);

    let second = delete(&app, &format!("/api/services/{}", id)).await;
    assert_error(&second, StatusCode::NOT_FOUND, "SERVICE_NOT_FOUND");
}

/// DELETE /api/services/:id - 異常系: 依存関係から参照されている
#[tokio::test]
async fn test_delete_referenced_service_conflicts() {
    let (app, _pool) = build_seeded_app().await;
    let list = get(&app, "/api/services").await;
    let id = list.body["items"][0]["serviceId"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/services/{}", id)).await;

    assert_error(&response, StatusCode::CONFLICT, "CONFLICT");
    let still_there = get(&app, &format!("/api/services/{}", id)).await;
    assert_eq!(still_there.status, StatusCode::OK);
}
