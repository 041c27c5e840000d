//! Development token minting.
//!
//! Signs tokens with the configured identity-provider secret so the API
//! can be exercised locally without the provider.

use clap::{Args, Subcommand, ValueEnum};

use jurist_auth::{JwtEncoder, UserType};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Declared account kind
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Kind {
    /// Lawyer account
    Lawyer,
    /// Administrator account
    Admin,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a signed bearer token
    Issue {
        /// Identity-provider subject
        #[arg(short, long)]
        subject: String,
        /// Account e-mail
        #[arg(short, long)]
        email: String,
        /// Declared account kind
        #[arg(short, long, value_enum)]
        kind: Option<Kind>,
        /// Leave the e-mail unconfirmed
        #[arg(long)]
        unverified: bool,
        /// Lifetime in minutes
        #[arg(long, default_value = "60")]
        ttl_minutes: i64,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, env: &str) -> anyhow::Result<()> {
    let config = super::load_config(env)?;
    if config.auth.jwt_secret.is_empty() {
        anyhow::bail!("auth.jwt_secret is not configured");
    }

    match &args.command {
        TokenCommand::Issue {
            subject,
            email,
            kind,
            unverified,
            ttl_minutes,
        } => {
            let user_type = kind.map(|k| match k {
                Kind::Lawyer => UserType::Lawyer,
                Kind::Admin => UserType::Admin,
            });
            let confirmed_at = (!unverified).then(chrono::Utc::now);
            let token = JwtEncoder::new(&config.auth).issue(
                subject,
                email,
                user_type,
                confirmed_at,
                chrono::Duration::minutes(*ttl_minutes),
            )?;
            println!("{token}");
        }
    }
    Ok(())
}
