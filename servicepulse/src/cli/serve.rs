//! serve サブコマンド
//!
//! データベースを初期化してHTTPサーバーを起動します。

use crate::common::error::PulseError;
use crate::config::{DatabaseConfig, ServerConfig};
use crate::{db, server, AppState};
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "SERVICEPULSE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVICEPULSE_HOST")]
    pub host: String,

    /// SQLite database URL
    #[arg(
        long,
        default_value = "sqlite:data/servicepulse.db",
        env = "SERVICEPULSE_DATABASE_URL"
    )]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, default_value = "5", env = "SERVICEPULSE_DB_MAX_CONNECTIONS")]
    pub max_connections: u32,

    /// Insert development seed data when the store is empty
    #[arg(
        long,
        env = "SERVICEPULSE_SEED",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub seed: bool,
}

impl ServeArgs {
    /// サブコマンド無しで起動した場合の設定（環境変数から）
    pub fn from_env() -> Self {
        let server = ServerConfig::from_env();
        let database = DatabaseConfig::from_env();
        Self {
            port: server.port,
            host: server.host,
            database_url: database.url,
            max_connections: database.max_connections,
            seed: server.seed,
        }
    }

    /// `host:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// サーバーを起動し、シャットダウンまで待機する
pub async fn execute(args: &ServeArgs) -> Result<(), PulseError> {
    let pool = db::migrations::initialize_database(&args.database_url, args.max_connections).await?;

    if args.seed {
        db::seed::seed_if_empty(&pool).await?;
    }

    let state = AppState::new(pool.clone());
    let result = server::run(state, &args.bind_addr()).await;

    pool.close().await;
    result
}
