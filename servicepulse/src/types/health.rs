//! ヘルスチェック型定義
//!
//! サービスから報告されたヘルスチェック結果の型

use crate::common::error::PulseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// ヘルスチェックの状態
///
/// ストレージ層でもこの3値に制限される（CHECK制約）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    /// 正常
    Healthy,
    /// 性能低下
    Degraded,
    /// 異常
    Unhealthy,
}

impl HealthStatus {
    /// 受け付ける全ステータス
    pub const ALL: [HealthStatus; 3] = [Self::Healthy, Self::Degraded, Self::Unhealthy];

    /// HealthStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Degraded => "Degraded",
            Self::Unhealthy => "Unhealthy",
        }
    }
}

impl FromStr for HealthStatus {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healthy" => Ok(Self::Healthy),
            "Degraded" => Ok(Self::Degraded),
            "Unhealthy" => Ok(Self::Unhealthy),
            _ => Err(PulseError::Validation(
                "Status must be 'Healthy', 'Degraded', or 'Unhealthy'".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 記録済みヘルスチェック
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheck {
    /// 一意識別子（自動採番）
    pub id: i64,
    /// 親サービスID
    pub service_id: i64,
    /// 親サービス名（読み出し時に結合）
    pub service_name: Option<String>,
    /// 状態
    pub status: HealthStatus,
    /// 応答時間（ミリ秒）
    pub response_time_ms: Option<u32>,
    /// チェック時刻
    pub checked_at: DateTime<Utc>,
    /// 任意の詳細情報（スキーマなし）
    pub details: Option<Map<String, Value>>,
}

/// ヘルスチェック送信の入力
#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthCheck {
    /// 状態
    pub status: HealthStatus,
    /// 応答時間（ミリ秒）
    pub response_time_ms: Option<u32>,
    /// 任意の詳細情報
    pub details: Option<Map<String, Value>>,
}
