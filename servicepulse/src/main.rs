//! ServicePulse Server Entry Point

use clap::Parser;
use servicepulse::cli::{serve::ServeArgs, Cli, Commands};
use servicepulse::logging;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Seed(args)) => {
            servicepulse::cli::seed::execute(&args)
                .await
                .map(|seeded| {
                    if seeded {
                        info!("Seed data inserted into {}", args.database_url);
                    } else {
                        info!("Services already exist, seed skipped");
                    }
                })
        }
        Some(Commands::Serve(args)) => servicepulse::cli::serve::execute(&args).await,
        // サブコマンド無しは環境変数の設定で起動
        None => servicepulse::cli::serve::execute(&ServeArgs::from_env()).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
