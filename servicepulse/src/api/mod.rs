//! REST APIハンドラー
//!
//! サービス登録とヘルスチェックのルーティング

pub mod error;
pub mod health_checks;
pub mod services;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// アプリケーションのルーターを構築する
pub fn create_app(state: AppState) -> Router {
    let service_routes = Router::new()
        .route(
            "/api/services",
            post(services::create_service).get(services::list_services),
        )
        .route("/api/services/search", get(services::search_services))
        .route(
            "/api/services/:id",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .route("/api/services/:id/health", get(services::get_service_health))
        .route(
            "/api/services/:id/healthchecks",
            post(health_checks::submit_health_check)
                .get(health_checks::list_service_health_checks),
        )
        .route(
            "/api/services/:id/healthchecks/latest",
            get(health_checks::latest_service_health_check),
        );

    let health_check_routes = Router::new()
        .route("/api/healthchecks", get(health_checks::list_health_checks))
        .route("/api/healthchecks/:id", get(health_checks::get_health_check))
        .route(
            "/api/healthchecks/status/:status",
            get(health_checks::list_health_checks_by_status),
        );

    Router::new()
        .merge(service_routes)
        .merge(health_check_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
