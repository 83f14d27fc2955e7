//! ヘルスチェックサービス
//!
//! 送信されたヘルスチェックの記録と、各種フィルタでの履歴取得。

use crate::common::error::{PulseError, PulseResult};
use crate::db::traits::HealthCheckRepository;
use crate::types::{HealthCheck, HealthStatus, NewHealthCheck};
use chrono::Utc;
use sqlx::SqlitePool;

/// ヘルスチェックの記録と照会
#[derive(Clone)]
pub struct HealthCheckService<R = SqlitePool> {
    repo: R,
}

impl<R> HealthCheckService<R>
where
    R: HealthCheckRepository,
{
    /// Repositoryを受け取って生成
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// ヘルスチェックを記録する
    ///
    /// チェック時刻と親サービスの`last_seen_at`は同じ時刻になる。
    /// サービスが存在しない場合は`ServiceNotFound`を返し、何も書き込まない。
    pub async fn submit(&self, service_id: i64, check: NewHealthCheck) -> PulseResult<HealthCheck> {
        let recorded = self
            .repo
            .submit_health_check(service_id, &check, Utc::now())
            .await
            .map_err(database_error)?;

        let Some(recorded) = recorded else {
            tracing::warn!(service_id, "Health check submitted for non-existent service");
            return Err(PulseError::ServiceNotFound(service_id));
        };

        tracing::info!(
            health_check_id = recorded.id,
            service_id,
            service_name = recorded.service_name.as_deref().unwrap_or_default(),
            status = %recorded.status,
            "Health check submitted"
        );
        Ok(recorded)
    }

    /// IDでヘルスチェックを取得
    pub async fn get(&self, id: i64) -> PulseResult<Option<HealthCheck>> {
        self.repo.get_health_check(id).await.map_err(database_error)
    }

    /// サービスのヘルスチェックを新しい順に取得
    pub async fn list_by_service(&self, service_id: i64, limit: i64) -> PulseResult<Vec<HealthCheck>> {
        self.repo
            .list_health_checks_by_service(service_id, limit)
            .await
            .map_err(database_error)
    }

    /// サービスの最新ヘルスチェックを取得
    pub async fn latest_for_service(&self, service_id: i64) -> PulseResult<Option<HealthCheck>> {
        self.repo
            .latest_health_check(service_id)
            .await
            .map_err(database_error)
    }

    /// 状態でフィルタして新しい順に取得
    pub async fn list_by_status(
        &self,
        status: HealthStatus,
        limit: i64,
    ) -> PulseResult<Vec<HealthCheck>> {
        self.repo
            .list_health_checks_by_status(status, limit)
            .await
            .map_err(database_error)
    }

    /// 全サービスのヘルスチェックを新しい順に取得
    pub async fn list_all(&self, limit: i64, offset: i64) -> PulseResult<Vec<HealthCheck>> {
        self.repo
            .list_health_checks(limit, offset)
            .await
            .map_err(database_error)
    }
}

fn database_error(err: sqlx::Error) -> PulseError {
    tracing::error!(error = %err, "Health check store operation failed");
    PulseError::from(err)
}
