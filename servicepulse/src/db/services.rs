//! サービスデータベース操作

use super::{format_timestamp, parse_timestamp};
use crate::types::Service;
use sqlx::SqlitePool;

const SERVICE_COLUMNS: &str =
    "service_id, service_name, base_url, description, registered_at, last_seen_at";

/// サービスを登録し、採番されたIDを返す
pub async fn create(pool: &SqlitePool, service: &Service) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO services (service_name, base_url, description, registered_at, last_seen_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&service.name)
    .bind(&service.base_url)
    .bind(&service.description)
    .bind(format_timestamp(&service.registered_at))
    .bind(service.last_seen_at.as_ref().map(format_timestamp))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// IDでサービスを取得
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Service>, sqlx::Error> {
    let row = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE service_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Service::try_from).transpose()
}

/// 名前でサービスを取得（完全一致、大文字小文字を区別）
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Service>, sqlx::Error> {
    let row = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE service_name = ?"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.map(Service::try_from).transpose()
}

/// 名前・ベースURL・説明を更新（タイムスタンプは変更しない）
pub async fn update(pool: &SqlitePool, service: &Service) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE services SET service_name = ?, base_url = ?, description = ?
        WHERE service_id = ?
        "#,
    )
    .bind(&service.name)
    .bind(&service.base_url)
    .bind(&service.description)
    .bind(service.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// サービスを削除（ヘルスチェックはカスケード削除）
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM services WHERE service_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 名前の部分一致検索（大文字小文字を区別、名前昇順）
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<Service>, sqlx::Error> {
    // LIKEはASCIIの大文字小文字を区別しないためinstrを使う
    let rows = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE instr(service_name, ?) > 0 ORDER BY service_name ASC"
    ))
    .bind(term)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Service::try_from).collect()
}

/// 名前昇順で1ページ分のサービスを取得
pub async fn list_page(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<Service>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ServiceRow>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services ORDER BY service_name ASC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Service::try_from).collect()
}

/// 登録済みサービス数
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct ServiceRow {
    service_id: i64,
    service_name: String,
    base_url: Option<String>,
    description: Option<String>,
    registered_at: String,
    last_seen_at: Option<String>,
}

impl TryFrom<ServiceRow> for Service {
    type Error = sqlx::Error;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        Ok(Service {
            id: row.service_id,
            name: row.service_name,
            base_url: row.base_url,
            description: row.description,
            registered_at: parse_timestamp("registered_at", &row.registered_at)?,
            last_seen_at: row
                .last_seen_at
                .as_deref()
                .map(|s| parse_timestamp("last_seen_at", s))
                .transpose()?,
        })
    }
}
