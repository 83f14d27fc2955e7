//! CLI module for servicepulse
//!
//! Provides the command-line interface of the registry server.

pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

/// ServicePulse - service registry and health-check tracking backend
#[derive(Parser, Debug)]
#[command(name = "servicepulse")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SERVICEPULSE_HOST                Bind address (default: 0.0.0.0)
    SERVICEPULSE_PORT                Listen port (default: 8080)
    SERVICEPULSE_DATABASE_URL        Database URL (default: sqlite:data/servicepulse.db)
    SERVICEPULSE_DB_MAX_CONNECTIONS  Pool size (default: 5)
    SERVICEPULSE_SEED                Seed development data on startup (true/false)
    SERVICEPULSE_LOG_LEVEL           Log filter (default: info,sqlx=warn)
    SERVICEPULSE_LOG_DIR             Also write daily-rotated log files here
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Migrate the database and insert development seed data
    Seed(seed::SeedArgs),
}
