//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use jurist_core::types::PageRequest;
use jurist_database::repositories::audit::AuditLogRepository;
use jurist_database::store::{AuditFilter, AuditStore};
use jurist_entity::audit::AuditLogEntry;

use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List audit entries, newest first
    List {
        /// Filter by action (e.g. APPROVE_LAWYER)
        #[arg(short, long)]
        action: Option<String>,
        /// Filter by target type (lawyer_profile, request)
        #[arg(short, long)]
        target_type: Option<String>,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u64,
        /// Entries per page
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// Time
    time: String,
    /// Actor kind
    actor_kind: String,
    /// Actor ID
    actor: String,
    /// Action
    action: String,
    /// Target
    target: String,
    /// IP
    ip: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            time: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            actor_kind: format!("{:?}", e.actor_kind).to_lowercase(),
            actor: e.actor_id.to_string(),
            action: e.action.clone(),
            target: format!("{}:{}", e.target_type, e.target_id),
            ip: e.ip_address.clone().unwrap_or_default(),
        }
    }
}

/// Execute audit commands
pub async fn execute(args: &AuditArgs, env: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let audits = AuditLogRepository::new(pool.clone());

    match &args.command {
        AuditCommand::List {
            action,
            target_type,
            page,
            limit,
        } => {
            let filter = AuditFilter {
                action: action.clone(),
                target_type: target_type.clone(),
            };
            let response = audits.list(&filter, &PageRequest::new(*page, *limit)).await?;

            match format {
                OutputFormat::Json => output::print_item(&response, format),
                OutputFormat::Table => {
                    let rows: Vec<AuditRow> = response.items.iter().map(AuditRow::from).collect();
                    output::print_list(&rows, format);
                    println!(
                        "page {}/{} ({} entries)",
                        response.page, response.total_pages, response.total_items
                    );
                }
            }
        }
    }

    pool.close().await;
    Ok(())
}
