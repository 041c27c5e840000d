//! Administrator provisioning commands.

use anyhow::Context;
use clap::{Args, Subcommand};

use jurist_database::repositories::admin::AdminRepository;
use jurist_database::store::AdminStore;
use jurist_entity::admin::{AdminRole, NewAdminUser};

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Provision an administrator for an existing identity-provider account
    Create {
        /// Identity-provider subject (`sub` claim)
        #[arg(short, long)]
        subject: String,
        /// E-mail address
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Role: SUPER_ADMIN or MODERATOR
        #[arg(short, long, default_value = "MODERATOR")]
        role: String,
    },
    /// Show the administrator linked to an identity-provider subject
    Show {
        /// Identity-provider subject
        #[arg(short, long)]
        subject: String,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, env: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;
    let admins = AdminRepository::new(pool.clone());

    match &args.command {
        AdminCommand::Create {
            subject,
            email,
            name,
            role,
        } => {
            let role: AdminRole = role.parse()?;
            let email = email.trim().to_lowercase();
            let name = name.trim();
            if subject.trim().is_empty() || email.is_empty() || name.is_empty() {
                anyhow::bail!("subject, email and name must not be empty");
            }

            let admin = admins
                .insert(
                    &NewAdminUser {
                        external_ref: subject.trim().to_string(),
                        email,
                        full_name: name.to_string(),
                        role,
                    },
                    chrono::Utc::now(),
                )
                .await
                .context("Failed to create administrator")?;

            tracing::info!(admin_id = %admin.id, role = %admin.role, "Administrator provisioned");
            output::print_success(&format!("Administrator '{}' created.", admin.email));
            output::print_item(&admin, format);
        }
        AdminCommand::Show { subject } => {
            let admin = admins
                .find_by_external_ref(subject.trim())
                .await?
                .with_context(|| format!("No administrator for subject '{subject}'"))?;
            output::print_item(&admin, format);
        }
    }

    pool.close().await;
    Ok(())
}
