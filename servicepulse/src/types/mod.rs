//! 型定義モジュール
//!
//! ドメインエンティティの型定義を提供

/// サービス関連の型定義
pub mod service;

/// ヘルスチェック関連の型定義
pub mod health;

/// ページング結果
pub mod paging;

pub use health::{HealthCheck, HealthStatus, NewHealthCheck};
pub use paging::PagedResult;
pub use service::{NewService, Service, ServiceChanges};
