//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// サービス管理
pub mod services;

/// ヘルスチェック履歴
pub mod health_checks;

/// 開発用シードデータ
pub mod seed;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

use chrono::{DateTime, SecondsFormat, Utc};

/// タイムスタンプをTEXT列用の固定幅RFC3339文字列に変換する
///
/// 固定幅のため文字列比較で時刻順に並ぶ。
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// TEXT列のタイムスタンプを読み出す
pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// 一意制約違反かどうか
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// 外部キー制約違反かどうか
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
