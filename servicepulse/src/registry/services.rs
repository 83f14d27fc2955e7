//! サービス登録サービス
//!
//! ハンドラーから呼ばれる薄いサービス層。入力検証はハンドラー側で済んでいる前提。

use crate::common::error::{PulseError, PulseResult};
use crate::db::traits::{HealthCheckRepository, ServiceRepository};
use crate::db::{is_foreign_key_violation, is_unique_violation};
use crate::health::ServiceHealthSummary;
use crate::types::paging::page_offset;
use crate::types::{NewService, PagedResult, Service, ServiceChanges};
use chrono::Utc;
use sqlx::SqlitePool;

/// サービス登録・照会・更新・削除
#[derive(Clone)]
pub struct RegistrationService<R = SqlitePool> {
    repo: R,
}

impl<R> RegistrationService<R>
where
    R: ServiceRepository,
{
    /// Repositoryを受け取って生成
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// サービスを登録する
    ///
    /// 同名サービスが存在する場合は`Conflict`。
    pub async fn register(&self, new_service: NewService) -> PulseResult<Service> {
        if self
            .repo
            .find_service_by_name(&new_service.name)
            .await
            .map_err(database_error)?
            .is_some()
        {
            tracing::warn!(service_name = %new_service.name, "Attempted to register duplicate service");
            return Err(duplicate_name(&new_service.name));
        }

        let mut service = new_service.into_service(Utc::now());
        let id = self.repo.create_service(&service).await.map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!(service_name = %service.name, "Duplicate service name rejected by store");
                duplicate_name(&service.name)
            } else {
                database_error(e)
            }
        })?;
        service.id = id;

        tracing::info!(
            service_id = service.id,
            service_name = %service.name,
            "Service registered"
        );
        Ok(service)
    }

    /// IDでサービスを取得
    pub async fn get(&self, id: i64) -> PulseResult<Option<Service>> {
        self.repo.get_service(id).await.map_err(database_error)
    }

    /// 名前でサービスを取得
    pub async fn get_by_name(&self, name: &str) -> PulseResult<Option<Service>> {
        self.repo
            .find_service_by_name(name)
            .await
            .map_err(database_error)
    }

    /// 同名サービスが存在するか
    pub async fn exists_by_name(&self, name: &str) -> PulseResult<bool> {
        Ok(self.get_by_name(name).await?.is_some())
    }

    /// サービスを更新する
    ///
    /// IDが無ければ`ServiceNotFound`、別サービスが新しい名前を使っていれば`Conflict`。
    pub async fn update(&self, id: i64, changes: ServiceChanges) -> PulseResult<Service> {
        let mut service = self
            .repo
            .get_service(id)
            .await
            .map_err(database_error)?
            .ok_or(PulseError::ServiceNotFound(id))?;

        if changes.name != service.name {
            let taken = self
                .repo
                .find_service_by_name(&changes.name)
                .await
                .map_err(database_error)?
                .is_some_and(|other| other.id != id);
            if taken {
                tracing::warn!(service_id = id, service_name = %changes.name, "Rename to existing service name rejected");
                return Err(duplicate_name(&changes.name));
            }
        }

        service.apply(changes);
        let updated = self.repo.update_service(&service).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(&service.name)
            } else {
                database_error(e)
            }
        })?;
        if !updated {
            // 取得後に削除された
            return Err(PulseError::ServiceNotFound(id));
        }

        tracing::info!(service_id = id, service_name = %service.name, "Service updated");
        Ok(service)
    }

    /// サービスを削除する（ヘルスチェックも削除される）
    ///
    /// 存在しないIDは`Ok(false)`。他サービスの依存先として参照されている場合は`Conflict`。
    pub async fn delete(&self, id: i64) -> PulseResult<bool> {
        let deleted = self.repo.delete_service(id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                tracing::warn!(service_id = id, "Service is still referenced by a dependency");
                PulseError::Conflict(format!(
                    "Service with ID {} is referenced by other records",
                    id
                ))
            } else {
                database_error(e)
            }
        })?;

        if deleted {
            tracing::info!(service_id = id, "Service deleted");
        }
        Ok(deleted)
    }

    /// 名前の部分一致検索（名前昇順）
    pub async fn search(&self, term: &str) -> PulseResult<Vec<Service>> {
        self.repo.search_services(term).await.map_err(database_error)
    }

    /// 名前昇順で1ページ分を取得
    pub async fn list(&self, page_number: i64, page_size: i64) -> PulseResult<PagedResult<Service>> {
        let total_count = self.repo.count_services().await.map_err(database_error)?;
        let items = self
            .repo
            .list_services_page(page_offset(page_number, page_size), page_size)
            .await
            .map_err(database_error)?;

        Ok(PagedResult::new(items, total_count, page_number, page_size))
    }
}

impl<R> RegistrationService<R>
where
    R: ServiceRepository + HealthCheckRepository,
{
    /// サービスのヘルスサマリーを算出する
    pub async fn health_summary(&self, id: i64) -> PulseResult<ServiceHealthSummary> {
        let service = self
            .repo
            .get_service(id)
            .await
            .map_err(database_error)?
            .ok_or(PulseError::ServiceNotFound(id))?;
        let checks = self
            .repo
            .list_all_health_checks_for_service(id)
            .await
            .map_err(database_error)?;

        Ok(ServiceHealthSummary::compute(&service, &checks))
    }
}

fn duplicate_name(name: &str) -> PulseError {
    PulseError::Conflict(format!("Service with name '{}' already exists", name))
}

fn database_error(err: sqlx::Error) -> PulseError {
    tracing::error!(error = %err, "Service store operation failed");
    PulseError::from(err)
}
