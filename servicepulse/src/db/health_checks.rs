//! ヘルスチェック履歴のデータベース操作
//!
//! 読み出しは常にservicesを結合してサービス名を埋める。
//! 並び順は`checked_at`降順、同時刻はID降順。

use super::{format_timestamp, parse_timestamp};
use crate::types::{HealthCheck, HealthStatus, NewHealthCheck};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

const SELECT_HEALTH_CHECKS: &str = r#"
    SELECT h.health_check_id, h.service_id, s.service_name, h.status,
           h.response_time_ms, h.checked_at, h.details
    FROM health_checks h
    JOIN services s ON s.service_id = h.service_id
"#;

const NEWEST_FIRST: &str = "ORDER BY h.checked_at DESC, h.health_check_id DESC";

/// ヘルスチェックを記録し、親サービスの最終確認時刻を同じ時刻に更新する
///
/// 1トランザクションで実行する。サービスが存在しない場合は何も書き込まず`None`を返す。
pub async fn submit_with_touch(
    pool: &SqlitePool,
    service_id: i64,
    check: &NewHealthCheck,
    now: DateTime<Utc>,
) -> Result<Option<HealthCheck>, sqlx::Error> {
    let checked_at = format_timestamp(&now);
    let details = check.details.as_ref().map(encode_details).transpose()?;

    let mut tx = pool.begin().await?;

    // 最初に書き込みロックを取得する（読み取り後の昇格はSQLITE_BUSYになる）
    let service_name: Option<String> = sqlx::query_scalar(
        "UPDATE services SET last_seen_at = ? WHERE service_id = ? RETURNING service_name",
    )
    .bind(&checked_at)
    .bind(service_id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(service_name) = service_name else {
        tx.rollback().await?;
        return Ok(None);
    };

    let result = sqlx::query(
        r#"
        INSERT INTO health_checks (service_id, status, response_time_ms, checked_at, details)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(service_id)
    .bind(check.status.as_str())
    .bind(check.response_time_ms.map(i64::from))
    .bind(&checked_at)
    .bind(&details)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(HealthCheck {
        id: result.last_insert_rowid(),
        service_id,
        service_name: Some(service_name),
        status: check.status,
        response_time_ms: check.response_time_ms,
        checked_at: now,
        details: check.details.clone(),
    }))
}

/// IDでヘルスチェックを取得
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<HealthCheck>, sqlx::Error> {
    let row = sqlx::query_as::<_, HealthCheckRow>(&format!(
        "{SELECT_HEALTH_CHECKS} WHERE h.health_check_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(HealthCheck::try_from).transpose()
}

/// サービスのヘルスチェックを新しい順に最大`limit`件取得
pub async fn list_by_service(
    pool: &SqlitePool,
    service_id: i64,
    limit: i64,
) -> Result<Vec<HealthCheck>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HealthCheckRow>(&format!(
        "{SELECT_HEALTH_CHECKS} WHERE h.service_id = ? {NEWEST_FIRST} LIMIT ?"
    ))
    .bind(service_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HealthCheck::try_from).collect()
}

/// サービスの全ヘルスチェック履歴を取得（サマリー集計用）
pub async fn list_all_for_service(
    pool: &SqlitePool,
    service_id: i64,
) -> Result<Vec<HealthCheck>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HealthCheckRow>(&format!(
        "{SELECT_HEALTH_CHECKS} WHERE h.service_id = ? {NEWEST_FIRST}"
    ))
    .bind(service_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HealthCheck::try_from).collect()
}

/// サービスの最新ヘルスチェックを取得
pub async fn latest_for_service(
    pool: &SqlitePool,
    service_id: i64,
) -> Result<Option<HealthCheck>, sqlx::Error> {
    Ok(list_by_service(pool, service_id, 1).await?.into_iter().next())
}

/// 状態でフィルタして新しい順に最大`limit`件取得
pub async fn list_by_status(
    pool: &SqlitePool,
    status: HealthStatus,
    limit: i64,
) -> Result<Vec<HealthCheck>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HealthCheckRow>(&format!(
        "{SELECT_HEALTH_CHECKS} WHERE h.status = ? {NEWEST_FIRST} LIMIT ?"
    ))
    .bind(status.as_str())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HealthCheck::try_from).collect()
}

/// 全サービスのヘルスチェックを新しい順に取得
pub async fn list_all(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<HealthCheck>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HealthCheckRow>(&format!(
        "{SELECT_HEALTH_CHECKS} {NEWEST_FIRST} LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(HealthCheck::try_from).collect()
}

/// ヘルスチェック総数
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM health_checks")
        .fetch_one(pool)
        .await
}

fn encode_details(details: &Map<String, Value>) -> Result<String, sqlx::Error> {
    serde_json::to_string(details).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct HealthCheckRow {
    health_check_id: i64,
    service_id: i64,
    service_name: String,
    status: String,
    response_time_ms: Option<i64>,
    checked_at: String,
    details: Option<String>,
}

impl TryFrom<HealthCheckRow> for HealthCheck {
    type Error = sqlx::Error;

    fn try_from(row: HealthCheckRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<HealthStatus>()
            .map_err(|e| decode_error("status", e))?;
        let response_time_ms = row
            .response_time_ms
            .map(u32::try_from)
            .transpose()
            .map_err(|e| decode_error("response_time_ms", e))?;
        let details = row
            .details
            .as_deref()
            .map(serde_json::from_str::<Map<String, Value>>)
            .transpose()
            .map_err(|e| decode_error("details", e))?;

        Ok(HealthCheck {
            id: row.health_check_id,
            service_id: row.service_id,
            service_name: Some(row.service_name),
            status,
            response_time_ms,
            checked_at: parse_timestamp("checked_at", &row.checked_at)?,
            details,
        })
    }
}

fn decode_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
