//! ヘルスチェック受付と集計
//!
//! サービスから送信されたヘルスチェック結果を記録し、履歴を照会・集計する。

pub mod checks;
pub mod summary;

pub use checks::HealthCheckService;
pub use summary::ServiceHealthSummary;
