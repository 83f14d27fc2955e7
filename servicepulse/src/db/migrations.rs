// データベース初期化とマイグレーション実行

use crate::common::error::PulseError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// ファイルDBの場合、親ディレクトリとファイルが無ければ作成する。
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/servicepulse.db"）
/// * `max_connections` - プールの最大接続数
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(PulseError)` - 初期化失敗
pub async fn initialize_database(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, PulseError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| PulseError::Config(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(parent) = database_parent_dir(options.get_filename()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            PulseError::Database(format!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    tracing::info!("Connecting to database: {}", database_url);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| PulseError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), PulseError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// 作成が必要な親ディレクトリ（インメモリDBやカレントディレクトリ直下ならNone）
fn database_parent_dir(filename: &Path) -> Option<&Path> {
    if filename.as_os_str().is_empty() || filename.to_string_lossy().starts_with(':') {
        return None;
    }
    filename
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && !parent.exists())
}
