//! ロギング初期化ユーティリティ
//!
//! `SERVICEPULSE_LOG_LEVEL`（未設定時は`RUST_LOG`）でフィルタを決め、標準出力へ出力する。
//! `SERVICEPULSE_LOG_DIR`が設定されていれば日次ローテーションのファイルにも書き出す。

use crate::common::error::PulseError;
use crate::config::get_env_with_fallback;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 既定のフィルタ
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "servicepulse.log";

/// ロギングを初期化する
///
/// ファイル出力を有効にした場合は`WorkerGuard`を返す。プロセス終了まで保持すること。
pub fn init() -> Result<Option<WorkerGuard>, PulseError> {
    let filter = build_filter(get_env_with_fallback("SERVICEPULSE_LOG_LEVEL", "RUST_LOG").as_deref());
    let log_dir = std::env::var("SERVICEPULSE_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty());

    let stdout_layer = fmt::layer().with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                PulseError::Config(format!("Failed to create log directory {}: {}", dir, e))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PulseError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// フィルタ文字列から`EnvFilter`を構築する（不正・未指定なら既定値）
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
