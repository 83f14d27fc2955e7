//! サービスのヘルスサマリー集計
//!
//! 全ヘルスチェック履歴（期間フィルタなし）を1パスで集計する。

use crate::types::{HealthCheck, HealthStatus, Service};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// サービスのヘルスサマリー（永続化しない派生値）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthSummary {
    /// サービスID
    pub service_id: i64,
    /// サービス名
    pub service_name: String,
    /// ベースURL
    pub base_url: Option<String>,
    /// 最新チェックの状態（チェックなしはnull）
    pub current_status: Option<HealthStatus>,
    /// 最新チェックの時刻
    pub last_check_at: Option<DateTime<Utc>>,
    /// チェック総数
    pub total_health_checks: u64,
    /// Healthy件数
    pub healthy_count: u64,
    /// Degraded件数
    pub degraded_count: u64,
    /// Unhealthy件数
    pub unhealthy_count: u64,
    /// 平均応答時間（応答時間を持つチェックのみ対象、小数第2位で丸め）
    pub average_response_time_ms: Option<f64>,
    /// 稼働率（Healthyの割合、小数第2位で丸め）
    pub uptime_percentage: f64,
}

impl ServiceHealthSummary {
    /// サービスとそのヘルスチェック履歴からサマリーを算出する
    ///
    /// 最新チェックは`checked_at`が最大のもの。同時刻が複数ある場合はIDが最大のものを採用する。
    pub fn compute(service: &Service, checks: &[HealthCheck]) -> Self {
        let mut healthy = 0u64;
        let mut degraded = 0u64;
        let mut unhealthy = 0u64;
        let mut response_total = 0f64;
        let mut response_samples = 0u64;
        let mut latest: Option<&HealthCheck> = None;

        for check in checks {
            match check.status {
                HealthStatus::Healthy => healthy += 1,
                HealthStatus::Degraded => degraded += 1,
                HealthStatus::Unhealthy => unhealthy += 1,
            }

            if let Some(ms) = check.response_time_ms {
                response_total += f64::from(ms);
                response_samples += 1;
            }

            let is_newer = latest.map_or(true, |current| {
                (check.checked_at, check.id) > (current.checked_at, current.id)
            });
            if is_newer {
                latest = Some(check);
            }
        }

        let total = checks.len() as u64;
        let average_response_time_ms = if response_samples > 0 {
            Some(round2(response_total / response_samples as f64))
        } else {
            None
        };
        let uptime_percentage = if total > 0 {
            round2(100.0 * healthy as f64 / total as f64)
        } else {
            0.0
        };

        Self {
            service_id: service.id,
            service_name: service.name.clone(),
            base_url: service.base_url.clone(),
            current_status: latest.map(|c| c.status),
            last_check_at: latest.map(|c| c.checked_at),
            total_health_checks: total,
            healthy_count: healthy,
            degraded_count: degraded,
            unhealthy_count: unhealthy,
            average_response_time_ms,
            uptime_percentage,
        }
    }
}

/// 小数第2位で四捨五入
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
