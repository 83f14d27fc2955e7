//! Contract Test: GET /api/services, GET /api/services/:id
//!
//! サービス照会・ページング一覧API契約テスト

use crate::support::{assert_error, build_app, get, register_service};
use axum::http::StatusCode;

/// GET /api/services/:id - 正常系
#[tokio::test]
async fn test_get_service_by_id() {
    let (app, _pool) = build_app().await;
    let id = register_service(&app, "Catalog").await;

    let response = get(&app, &format!("/api/services/{}", id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["serviceId"], id);
    assert_eq!(response.body["serviceName"], "Catalog");
}

/// GET /api/services/:id - 異常系: 存在しないID
#[tokio::test]
async fn test_get_service_not_found() {
    let (app, _pool) = build_app().await;

    let response = get(&app, "/api/services/999").await;

    assert_error(&response, StatusCode::NOT_FOUND, "SERVICE_NOT_FOUND");
    assert_eq!(response.body["error"], "Service with ID 999 not found");
}

/// GET /api/services/:id - 異常系: 数値でないID
#[tokio::test]
async fn test_get_service_invalid_id() {
    let (app, _pool) = build_app().await;

    let response = get(&app, "/api/services/abc").await;

    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

/// GET /api/services - 空のストア
#[tokio::test]
async fn test_list_services_empty() {
    let (app, _pool) = build_app().await;

    let response = get(&app, "/api/services").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["totalCount"], 0);
    assert_eq!(response.body["pageNumber"], 1);
    assert_eq!(response.body["pageSize"], 20);
    assert_eq!(response.body["totalPages"], 0);
    assert_eq!(response.body["hasNext"], false);
    assert_eq!(response.body["hasPrevious"], false);
}

/// GET /api/services - 名前昇順のページング
#[tokio::test]
async fn test_list_services_paging() {
    let (app, _pool) = build_app().await;
    for name in ["Echo", "Alpha", "Delta", "Bravo", "Charlie"] {
        register_service(&app, name).await;
    }

    let first = get(&app, "/api/services?pageNumber=1&pageSize=2").await;
    assert_eq!(first.status, StatusCode::OK);
    let names: Vec<&str> = first.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["serviceName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);
    assert_eq!(first.body["totalCount"], 5);
    assert_eq!(first.body["totalPages"], 3);
    assert_eq!(first.body["hasNext"], true);
    assert_eq!(first.body["hasPrevious"], false);

    let last = get(&app, "/api/services?pageNumber=3&pageSize=2").await;
    let items = last.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["serviceName"], "Echo");
    assert_eq!(last.body["hasNext"], false);
    assert_eq!(last.body["hasPrevious"], true);

    // 範囲外のページは空
    let beyond = get(&app, "/api/services?pageNumber=9&pageSize=2").await;
    assert_eq!(beyond.status, StatusCode::OK);
    assert!(beyond.body["items"].as_array().unwrap().is_empty());
    assert_eq!(beyond.body["totalCount"], 5);
}

/// GET /api/services - 異常系: ページング引数
#[tokio::test]
async fn test_list_services_invalid_paging() {
    let (app, _pool) = build_app().await;

    let zero_page = get(&app, "/api/services?pageNumber=0").await;
    assert_error(&zero_page, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(zero_page.body["error"], "Page number must be at least 1");

    for size in ["0", "101"] {
        let response = get(&app, &format!("/api/services?pageSize={}", size)).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        assert_eq!(response.body["error"], "Page size must be between 1 and 100");
    }

    let not_a_number = get(&app, "/api/services?pageSize=ten").await;
    assert_error(&not_a_number, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}
