//! サービス管理API
//!
//! 登録・照会・更新・削除・検索・ページング一覧とヘルスサマリー

use super::error::AppError;
use crate::common::error::PulseError;
use crate::health::ServiceHealthSummary;
use crate::types::{NewService, PagedResult, Service, ServiceChanges};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// サービス名の最大長（文字数）
const MAX_SERVICE_NAME_LENGTH: usize = 255;
/// ベースURLの最大長（文字数）
const MAX_BASE_URL_LENGTH: usize = 500;
/// 説明の最大長（文字数）
const MAX_DESCRIPTION_LENGTH: usize = 1000;
/// 一覧のページサイズ上限
const MAX_PAGE_SIZE: i64 = 100;

/// サービス登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    /// サービス名
    #[serde(default)]
    pub service_name: String,
    /// ベースURL
    #[serde(default)]
    pub base_url: Option<String>,
    /// 説明
    #[serde(default)]
    pub description: Option<String>,
}

/// サービス更新リクエスト
///
/// 全フィールドを上書きする（省略した任意項目はnullになる）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    /// 新しいサービス名
    #[serde(default)]
    pub service_name: String,
    /// 新しいベースURL
    #[serde(default)]
    pub base_url: Option<String>,
    /// 新しい説明
    #[serde(default)]
    pub description: Option<String>,
}

/// サービスレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    /// サービスID
    pub service_id: i64,
    /// サービス名
    pub service_name: String,
    /// ベースURL
    pub base_url: Option<String>,
    /// 説明
    pub description: Option<String>,
    /// 登録日時
    pub registered_at: DateTime<Utc>,
    /// 最終確認時刻
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            service_id: service.id,
            service_name: service.name,
            base_url: service.base_url,
            description: service.description,
            registered_at: service.registered_at,
            last_seen_at: service.last_seen_at,
        }
    }
}

/// 一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesQuery {
    /// ページ番号（1始まり）
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    /// ページサイズ
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// 検索のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 検索語（サービス名の部分一致）
    #[serde(default)]
    pub q: Option<String>,
}

/// 名前・ベースURL・説明の検証
fn validate_service_fields(
    name: &str,
    base_url: Option<&str>,
    description: Option<&str>,
) -> Result<(), PulseError> {
    if name.trim().is_empty() {
        return Err(PulseError::Validation("Service name is required".to_string()));
    }
    if name.chars().count() > MAX_SERVICE_NAME_LENGTH {
        return Err(PulseError::Validation(format!(
            "Service name must be between 1 and {} characters",
            MAX_SERVICE_NAME_LENGTH
        )));
    }

    if let Some(base_url) = base_url {
        if base_url.chars().count() > MAX_BASE_URL_LENGTH {
            return Err(PulseError::Validation(format!(
                "Base URL must not exceed {} characters",
                MAX_BASE_URL_LENGTH
            )));
        }
        let valid = Url::parse(base_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(PulseError::Validation(
                "Base URL must be a valid URL".to_string(),
            ));
        }
    }

    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(PulseError::Validation(format!(
                "Description must not exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }

    Ok(())
}

/// POST /api/services - サービス登録
pub async fn create_service(
    State(state): State<AppState>,
    body: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = body?;
    validate_service_fields(
        &req.service_name,
        req.base_url.as_deref(),
        req.description.as_deref(),
    )?;

    let service = state
        .registrations
        .register(NewService {
            name: req.service_name,
            base_url: req.base_url,
            description: req.description,
        })
        .await?;

    let location = format!("/api/services/{}", service.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ServiceResponse::from(service)),
    ))
}

/// GET /api/services - ページング一覧（名前昇順）
pub async fn list_services(
    State(state): State<AppState>,
    query: Result<Query<ListServicesQuery>, QueryRejection>,
) -> Result<Json<PagedResult<ServiceResponse>>, AppError> {
    let Query(query) = query?;
    if query.page_number < 1 {
        return Err(PulseError::Validation("Page number must be at least 1".to_string()).into());
    }
    if query.page_size < 1 || query.page_size > MAX_PAGE_SIZE {
        return Err(PulseError::Validation(format!(
            "Page size must be between 1 and {}",
            MAX_PAGE_SIZE
        ))
        .into());
    }

    let page = state
        .registrations
        .list(query.page_number, query.page_size)
        .await?;
    Ok(Json(page.map(ServiceResponse::from)))
}

/// GET /api/services/:id - サービス取得
pub async fn get_service(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ServiceResponse>, AppError> {
    let Path(id) = id?;
    let service = state
        .registrations
        .get(id)
        .await?
        .ok_or(PulseError::ServiceNotFound(id))?;
    Ok(Json(service.into()))
}

/// PUT /api/services/:id - サービス更新
pub async fn update_service(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> Result<Json<ServiceResponse>, AppError> {
    let Path(id) = id?;
    let Json(req) = body?;
    validate_service_fields(
        &req.service_name,
        req.base_url.as_deref(),
        req.description.as_deref(),
    )?;

    let service = state
        .registrations
        .update(
            id,
            ServiceChanges {
                name: req.service_name,
                base_url: req.base_url,
                description: req.description,
            },
        )
        .await?;
    Ok(Json(service.into()))
}

/// DELETE /api/services/:id - サービス削除
pub async fn delete_service(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    if state.registrations.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(PulseError::ServiceNotFound(id).into())
    }
}

/// GET /api/services/search?q= - 名前の部分一致検索
pub async fn search_services(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let Query(query) = query?;
    let term = query.q.as_deref().unwrap_or_default();
    // 空白のみは拒否するが、一致判定には入力をそのまま使う
    if term.trim().is_empty() {
        return Err(PulseError::Validation("Search query is required".to_string()).into());
    }

    let services = state.registrations.search(term).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

/// GET /api/services/:id/health - ヘルスサマリー
pub async fn get_service_health(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ServiceHealthSummary>, AppError> {
    let Path(id) = id?;
    let summary = state.registrations.health_summary(id).await?;
    Ok(Json(summary))
}
