//! seed サブコマンド
//!
//! マイグレーションを実行し、空のストアに開発用データを投入して終了します。

use crate::common::error::PulseError;
use crate::db;
use clap::Args;

/// seed サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    /// SQLite database URL
    #[arg(
        long,
        default_value = "sqlite:data/servicepulse.db",
        env = "SERVICEPULSE_DATABASE_URL"
    )]
    pub database_url: String,
}

/// シードを実行する
///
/// 投入した場合は`true`、既にサービスが存在した場合は`false`。
pub async fn execute(args: &SeedArgs) -> Result<bool, PulseError> {
    let pool = db::migrations::initialize_database(&args.database_url, 1).await?;
    let seeded = db::seed::seed_if_empty(&pool).await?;
    pool.close().await;
    Ok(seeded)
}
