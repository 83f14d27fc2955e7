//! 開発用シードデータ
//!
//! サービスが1件も無いストアにだけ投入する。投入済みのストアには何もしない。

use super::format_timestamp;
use crate::common::error::PulseError;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

/// パスワードハッシュ化のコスト
const HASH_COST: u32 = 12;

/// サービスごとのヘルスチェック件数
const CHECKS_PER_SERVICE: i64 = 10;

struct SeedUser {
    display_name: &'static str,
    username: &'static str,
    password: &'static str,
    access_level: &'static str,
}

const SEED_USERS: [SeedUser; 2] = [
    SeedUser {
        display_name: "Admin User",
        username: "admin",
        password: "Admin123!",
        access_level: "Admin",
    },
    SeedUser {
        display_name: "Test User",
        username: "testuser",
        password: "Test123!",
        access_level: "User",
    },
];

struct SeedService {
    name: &'static str,
    base_url: &'static str,
    description: &'static str,
    last_seen_minutes_ago: i64,
}

const SEED_SERVICES: [SeedService; 3] = [
    SeedService {
        name: "User Service",
        base_url: "http://localhost:5001",
        description: "Handles user authentication and management",
        last_seen_minutes_ago: 0,
    },
    SeedService {
        name: "Order Service",
        base_url: "http://localhost:5002",
        description: "Processes and manages orders",
        last_seen_minutes_ago: 0,
    },
    SeedService {
        name: "Notification Service",
        base_url: "http://localhost:5003",
        description: "Sends notifications via email and webhooks",
        last_seen_minutes_ago: 30,
    },
];

/// ストアが空ならシードデータを投入する
///
/// # Returns
/// * `Ok(true)` - 投入した
/// * `Ok(false)` - サービスが既に存在するため何もしなかった
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<bool, PulseError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::info!(services = existing, "Store already populated, skipping seed");
        return Ok(false);
    }

    // ハッシュ化はトランザクション開始前に済ませる
    let mut password_hashes = Vec::with_capacity(SEED_USERS.len());
    for user in &SEED_USERS {
        let hash = bcrypt::hash(user.password, HASH_COST)
            .map_err(|e| PulseError::Internal(format!("Failed to hash password: {}", e)))?;
        password_hashes.push(hash);
    }

    let now = Utc::now();
    let now_text = format_timestamp(&now);
    let mut tx = pool.begin().await?;

    for (user, password_hash) in SEED_USERS.iter().zip(&password_hashes) {
        sqlx::query(
            r#"
            INSERT INTO users (user_guid, display_name, username, password_hash, access_level, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user.display_name)
        .bind(user.username)
        .bind(password_hash)
        .bind(user.access_level)
        .bind(&now_text)
        .execute(&mut *tx)
        .await?;
    }

    let mut service_ids = Vec::with_capacity(SEED_SERVICES.len());
    for service in &SEED_SERVICES {
        let last_seen = now - Duration::minutes(service.last_seen_minutes_ago);
        let result = sqlx::query(
            r#"
            INSERT INTO services (service_name, base_url, description, registered_at, last_seen_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(service.name)
        .bind(service.base_url)
        .bind(service.description)
        .bind(&now_text)
        .bind(format_timestamp(&last_seen))
        .execute(&mut *tx)
        .await?;
        service_ids.push(result.last_insert_rowid());
    }

    for (service_index, service_id) in service_ids.iter().enumerate() {
        let seed = service_index as i64;
        for i in 0..CHECKS_PER_SERVICE {
            let status = match i {
                0..=7 => "Healthy",
                8 => "Degraded",
                _ => "Unhealthy",
            };
            let response_time_ms = 50 + (seed * 37 + i * 53) % 450;
            let details = json!({
                "cpu": 10 + (seed * 7 + i * 11) % 70,
                "memory": 40 + (seed * 13 + i * 7) % 50,
            });
            let checked_at = now - Duration::minutes(i * 5);

            sqlx::query(
                r#"
                INSERT INTO health_checks (service_id, status, response_time_ms, checked_at, details)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(service_id)
            .bind(status)
            .bind(response_time_ms)
            .bind(format_timestamp(&checked_at))
            .bind(details.to_string())
            .execute(&mut *tx)
            .await?;
        }
    }

    // Order -> User, Notification -> Order
    for pair in service_ids.windows(2) {
        sqlx::query(
            r#"
            INSERT INTO service_dependencies (service_id, depends_on_service_id, discovered_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(pair[1])
        .bind(pair[0])
        .bind(&now_text)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(first) = service_ids.first() {
        sqlx::query(
            r#"
            INSERT INTO alert_rules (service_id, rule_type, threshold, log_type, notification_channel)
            VALUES (?, 'Alert', 500, 'error', 'email')
            "#,
        )
        .bind(first)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        users = SEED_USERS.len(),
        services = service_ids.len(),
        health_checks = service_ids.len() as i64 * CHECKS_PER_SERVICE,
        "Seed data inserted"
    );
    Ok(true)
}
