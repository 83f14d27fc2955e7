//! ヘルスチェックAPI
//!
//! ヘルスチェックの送信と、サービス別・状態別・全体の履歴取得

use super::error::AppError;
use crate::common::error::PulseError;
use crate::types::{HealthCheck, HealthStatus, NewHealthCheck};
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
use serde_json::{Map, Value};

/// サービス別一覧の既定件数
const DEFAULT_SERVICE_LIMIT: i64 = 10;
/// サービス別一覧の上限件数
const MAX_SERVICE_LIMIT: i64 = 100;
/// 状態別一覧の既定件数
const DEFAULT_STATUS_LIMIT: i64 = 50;
/// 状態別一覧の上限件数
const MAX_STATUS_LIMIT: i64 = 200;
/// 全体一覧の既定件数
const DEFAULT_ALL_LIMIT: i64 = 20;
/// 全体一覧の上限件数
const MAX_ALL_LIMIT: i64 = 100;

/// ヘルスチェック送信リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthCheckRequest {
    /// 状態（"Healthy" / "Degraded" / "Unhealthy"）
    #[serde(default)]
    pub status: Option<String>,
    /// 応答時間（ミリ秒）
    #[serde(default)]
    pub response_time_ms: Option<i64>,
    /// 任意の詳細情報
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
}

impl CreateHealthCheckRequest {
    /// 入力を検証してドメイン型へ変換
    fn into_new_health_check(self) -> Result<NewHealthCheck, PulseError> {
        let status = match self.status.as_deref() {
            None | Some("") => {
                return Err(PulseError::Validation("Status is required".to_string()));
            }
            Some(raw) => raw.parse::<HealthStatus>()?,
        };

        let response_time_ms = match self.response_time_ms {
            None => None,
            Some(ms) if ms < 0 => {
                return Err(PulseError::Validation(
                    "Response time must be non-negative".to_string(),
                ));
            }
            Some(ms) if ms > i64::from(i32::MAX) => {
                return Err(PulseError::Validation(format!(
                    "Response time must not exceed {}",
                    i32::MAX
                )));
            }
            Some(ms) => Some(ms as u32),
        };

        Ok(NewHealthCheck {
            status,
            response_time_ms,
            details: self.details,
        })
    }
}

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// ヘルスチェックID
    pub health_check_id: i64,
    /// サービスID
    pub service_id: i64,
    /// サービス名
    pub service_name: Option<String>,
    /// 状態
    pub status: HealthStatus,
    /// 応答時間（ミリ秒）
    pub response_time_ms: Option<u32>,
    /// チェック時刻
    pub checked_at: DateTime<Utc>,
    /// 詳細情報
    pub details: Option<Map<String, Value>>,
}

impl From<HealthCheck> for HealthCheckResponse {
    fn from(check: HealthCheck) -> Self {
        Self {
            health_check_id: check.id,
            service_id: check.service_id,
            service_name: check.service_name,
            status: check.status,
            response_time_ms: check.response_time_ms,
            checked_at: check.checked_at,
            details: check.details,
        }
    }
}

/// 件数指定のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// 最大件数
    #[serde(default)]
    pub limit: Option<i64>,
}

/// 全体一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListAllQuery {
    /// 最大件数
    #[serde(default)]
    pub limit: Option<i64>,
    /// 読み飛ばす件数
    #[serde(default)]
    pub offset: Option<i64>,
}

/// limitを既定値で補い、範囲を検証する
fn resolve_limit(limit: Option<i64>, default: i64, max: i64) -> Result<i64, PulseError> {
    let limit = limit.unwrap_or(default);
    if !(1..=max).contains(&limit) {
        return Err(PulseError::Validation(format!(
            "Limit must be between 1 and {}",
            max
        )));
    }
    Ok(limit)
}

fn to_responses(checks: Vec<HealthCheck>) -> Json<Vec<HealthCheckResponse>> {
    Json(checks.into_iter().map(HealthCheckResponse::from).collect())
}

/// POST /api/services/:id/healthchecks - ヘルスチェック送信
pub async fn submit_health_check(
    State(state): State<AppState>,
    service_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateHealthCheckRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(service_id) = service_id?;
    let Json(req) = body?;
    let check = req.into_new_health_check()?;

    let recorded = state.health_checks.submit(service_id, check).await?;

    let location = format!("/api/healthchecks/{}", recorded.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(HealthCheckResponse::from(recorded)),
    ))
}

/// GET /api/healthchecks/:id - ヘルスチェック取得
pub async fn get_health_check(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<HealthCheckResponse>, AppError> {
    let Path(id) = id?;
    let check = state
        .health_checks
        .get(id)
        .await?
        .ok_or(PulseError::HealthCheckNotFound(id))?;
    Ok(Json(check.into()))
}

/// GET /api/services/:id/healthchecks - サービス別の最近のヘルスチェック
pub async fn list_service_health_checks(
    State(state): State<AppState>,
    service_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<HealthCheckResponse>>, AppError> {
    let Path(service_id) = service_id?;
    let Query(query) = query?;
    let limit = resolve_limit(query.limit, DEFAULT_SERVICE_LIMIT, MAX_SERVICE_LIMIT)?;

    let checks = state
        .health_checks
        .list_by_service(service_id, limit)
        .await?;
    Ok(to_responses(checks))
}

/// GET /api/services/:id/healthchecks/latest - 最新ヘルスチェック
pub async fn latest_service_health_check(
    State(state): State<AppState>,
    service_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<HealthCheckResponse>, AppError> {
    let Path(service_id) = service_id?;
    let check = state
        .health_checks
        .latest_for_service(service_id)
        .await?
        .ok_or_else(|| {
            PulseError::NotFound(format!(
                "No health checks found for service {}",
                service_id
            ))
        })?;
    Ok(Json(check.into()))
}

/// GET /api/healthchecks/status/:status - 状態別一覧
pub async fn list_health_checks_by_status(
    State(state): State<AppState>,
    status: Result<Path<String>, PathRejection>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<HealthCheckResponse>>, AppError> {
    let Path(status) = status?;
    let status = status.parse::<HealthStatus>().map_err(|_| {
        PulseError::Validation(
            "Invalid status. Must be 'Healthy', 'Degraded', or 'Unhealthy'".to_string(),
        )
    })?;
    let Query(query) = query?;
    let limit = resolve_limit(query.limit, DEFAULT_STATUS_LIMIT, MAX_STATUS_LIMIT)?;

    let checks = state.health_checks.list_by_status(status, limit).await?;
    Ok(to_responses(checks))
}

/// GET /api/healthchecks - 全体一覧（新しい順）
pub async fn list_health_checks(
    State(state): State<AppState>,
    query: Result<Query<ListAllQuery>, QueryRejection>,
) -> Result<Json<Vec<HealthCheckResponse>>, AppError> {
    let Query(query) = query?;
    let limit = resolve_limit(query.limit, DEFAULT_ALL_LIMIT, MAX_ALL_LIMIT)?;
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(PulseError::Validation("Offset must be non-negative".to_string()).into());
    }

    let checks = state.health_checks.list_all(limit, offset).await?;
    Ok(to_responses(checks))
}
