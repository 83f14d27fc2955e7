//! ServicePulse Server
//!
//! サービスの登録とヘルスチェック履歴を管理する中央サーバー

#![warn(missing_docs)]

/// 共通エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ヘルスチェック記録・集計
pub mod health;

/// サービス登録管理
pub mod registry;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

/// HTTPサーバー起動・シャットダウン
pub mod server;

use health::HealthCheckService;
use registry::RegistrationService;
use sqlx::SqlitePool;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: SqlitePool,
    /// サービス登録
    pub registrations: RegistrationService,
    /// ヘルスチェック記録
    pub health_checks: HealthCheckService,
}

impl AppState {
    /// 接続プールから各サービスを組み立てる
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            registrations: RegistrationService::new(db_pool.clone()),
            health_checks: HealthCheckService::new(db_pool.clone()),
            db_pool,
        }
    }
}
