//! CLI command definitions and dispatch.

pub mod admin;
pub mod audit;
pub mod iin;
pub mod migrate;
pub mod token;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::PgPool;

use crate::output::OutputFormat;
use jurist_core::config::AppConfig;
use jurist_database::DatabasePool;

/// Jurist: legal services marketplace administration
#[derive(Debug, Parser)]
#[command(name = "jurist-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay (`config/{env}.toml`)
    #[arg(short, long, env = "JURIST_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Administrator provisioning
    Admin(admin::AdminArgs),
    /// Audit log
    Audit(audit::AuditArgs),
    /// National identification number checks
    Iin(iin::IinArgs),
    /// Development access tokens
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Admin(args) => admin::execute(args, &self.env, self.format).await,
            Commands::Audit(args) => audit::execute(args, &self.env, self.format).await,
            Commands::Iin(args) => iin::execute(args, self.format),
            Commands::Token(args) => token::execute(args, &self.env),
        }
    }
}

/// Helper: load configuration for the selected environment
pub fn load_config(env: &str) -> anyhow::Result<AppConfig> {
    AppConfig::load(env).with_context(|| format!("Failed to load configuration for '{env}'"))
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = DatabasePool::connect(&config.database)
        .await
        .context("Failed to connect to the database")?;
    Ok(pool.handle())
}
