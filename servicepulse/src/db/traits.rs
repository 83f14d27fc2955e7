//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait群。
//! 各traitは既存のフリー関数に対応する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::types::{HealthCheck, HealthStatus, NewHealthCheck, Service};

// ---------------------------------------------------------------------------
// ServiceRepository
// ---------------------------------------------------------------------------

/// サービスCRUD操作のRepository trait
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// サービスを登録し、採番されたIDを返す
    async fn create_service(&self, service: &Service) -> Result<i64, sqlx::Error>;
    /// IDでサービスを取得
    async fn get_service(&self, id: i64) -> Result<Option<Service>, sqlx::Error>;
    /// 名前でサービスを取得
    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, sqlx::Error>;
    /// サービスを更新
    async fn update_service(&self, service: &Service) -> Result<bool, sqlx::Error>;
    /// サービスを削除
    async fn delete_service(&self, id: i64) -> Result<bool, sqlx::Error>;
    /// 名前の部分一致検索
    async fn search_services(&self, term: &str) -> Result<Vec<Service>, sqlx::Error>;
    /// 1ページ分のサービスを取得
    async fn list_services_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Service>, sqlx::Error>;
    /// サービス総数
    async fn count_services(&self) -> Result<i64, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// HealthCheckRepository
// ---------------------------------------------------------------------------

/// ヘルスチェック履歴のRepository trait
#[async_trait]
pub trait HealthCheckRepository: Send + Sync {
    /// ヘルスチェックを記録し親サービスの最終確認時刻を更新（サービスが無ければNone）
    async fn submit_health_check(
        &self,
        service_id: i64,
        check: &NewHealthCheck,
        now: DateTime<Utc>,
    ) -> Result<Option<HealthCheck>, sqlx::Error>;
    /// IDでヘルスチェックを取得
    async fn get_health_check(&self, id: i64) -> Result<Option<HealthCheck>, sqlx::Error>;
    /// サービスのヘルスチェックを新しい順に取得
    async fn list_health_checks_by_service(
        &self,
        service_id: i64,
        limit: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error>;
    /// サービスの全ヘルスチェック履歴を取得
    async fn list_all_health_checks_for_service(
        &self,
        service_id: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error>;
    /// サービスの最新ヘルスチェックを取得
    async fn latest_health_check(
        &self,
        service_id: i64,
    ) -> Result<Option<HealthCheck>, sqlx::Error>;
    /// 状態でフィルタして新しい順に取得
    async fn list_health_checks_by_status(
        &self,
        status: HealthStatus,
        limit: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error>;
    /// 全ヘルスチェックを新しい順に取得
    async fn list_health_checks(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error>;
}

// ===========================================================================
// SqlitePool implementations
// ===========================================================================

#[async_trait]
impl ServiceRepository for SqlitePool {
    async fn create_service(&self, service: &Service) -> Result<i64, sqlx::Error> {
        super::services::create(self, service).await
    }

    async fn get_service(&self, id: i64) -> Result<Option<Service>, sqlx::Error> {
        super::services::get(self, id).await
    }

    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, sqlx::Error> {
        super::services::find_by_name(self, name).await
    }

    async fn update_service(&self, service: &Service) -> Result<bool, sqlx::Error> {
        super::services::update(self, service).await
    }

    async fn delete_service(&self, id: i64) -> Result<bool, sqlx::Error> {
        super::services::delete(self, id).await
    }

    async fn search_services(&self, term: &str) -> Result<Vec<Service>, sqlx::Error> {
        super::services::search(self, term).await
    }

    async fn list_services_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Service>, sqlx::Error> {
        super::services::list_page(self, offset, limit).await
    }

    async fn count_services(&self) -> Result<i64, sqlx::Error> {
        super::services::count(self).await
    }
}

#[async_trait]
impl HealthCheckRepository for SqlitePool {
    async fn submit_health_check(
        &self,
        service_id: i64,
        check: &NewHealthCheck,
        now: DateTime<Utc>,
    ) -> Result<Option<HealthCheck>, sqlx::Error> {
        super::health_checks::submit_with_touch(self, service_id, check, now).await
    }

    async fn get_health_check(&self, id: i64) -> Result<Option<HealthCheck>, sqlx::Error> {
        super::health_checks::get(self, id).await
    }

    async fn list_health_checks_by_service(
        &self,
        service_id: i64,
        limit: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error> {
        super::health_checks::list_by_service(self, service_id, limit).await
    }

    async fn list_all_health_checks_for_service(
        &self,
        service_id: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error> {
        super::health_checks::list_all_for_service(self, service_id).await
    }

    async fn latest_health_check(
        &self,
        service_id: i64,
    ) -> Result<Option<HealthCheck>, sqlx::Error> {
        super::health_checks::latest_for_service(self, service_id).await
    }

    async fn list_health_checks_by_status(
        &self,
        status: HealthStatus,
        limit: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error> {
        super::health_checks::list_by_status(self, status, limit).await
    }

    async fn list_health_checks(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HealthCheck>, sqlx::Error> {
        super::health_checks::list_all(self, limit, offset).await
    }
}
