//! Contract Test: GET /api/services/search
//!
//! サービス名の部分一致検索API契約テスト

use crate::support::{assert_error, build_app, get, register_service};
use axum::http::StatusCode;

fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["serviceName"].as_str().unwrap().to_string())
        .collect()
}

/// 部分一致・名前昇順
#[tokio::test]
async fn test_search_services_substring() {
    let (app, _pool) = build_app().await;
    for name in ["Order Writer", "Billing", "Order Reader", "Reorder Queue"] {
        register_service(&app, name).await;
    }

    let response = get(&app, "/api/services/search?q=Order").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Order Reader", "Order Writer"]);
}

/// 大文字小文字を区別する
#[tokio::test]
async fn test_search_services_case_sensitive() {
    let (app, _pool) = build_app().await;
    register_service(&app, "Order Writer").await;
    register_service(&app, "Reorder Queue").await;

    let response = get(&app, "/api/services/search?q=order").await;

    assert_eq!(names(&response.body), vec!["Reorder Queue"]);
}

/// 一致なしは空配列
#[tokio::test]
async fn test_search_services_no_match() {
    let (app, _pool) = build_app().await;
    register_service(&app, "Billing").await;

    let response = get(&app, "/api/services/search?q=zzz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(names(&response.body).is_empty());
}

/// 検索語の空白も一致判定に含める
#[tokio::test]
async fn test_search_services_keeps_surrounding_spaces() {
    let (app, _pool) = build_app().await;
    register_service(&app, "Order Service").await;
    register_service(&app, "ServiceMesh").await;

    let response = get(&app, "/api/services/search?q=%20Service").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body), vec!["Order Service"]);
}

/// 異常系: 検索語なし・空白のみ
#[tokio::test]
async fn test_search_services_requires_query() {
    let (app, _pool) = build_app().await;

    for uri in [
        "/api/services/search",
        "/api/services/search?q=",
        "/api/services/search?q=%20%20",
    ] {
        let response = get(&app, uri).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
        assert_eq!(response.body["error"], "Search query is required");
    }
}
