//! `reset-password` - issue a password reset token for a user.
//!
//! Prints the token to stdout; delivering it to the user is up to the
//! operator. Expired tokens are purged on each run.

use anyhow::{Context, Result};
use clap::Parser;

use localhub_core::DbConfig;
use localhub_server::db::pool;
use localhub_server::db::repos::{PasswordResetRepo, UserRepo};
use localhub_server::models::EmailAddress;

#[derive(Parser, Debug)]
pub struct ResetPasswordArgs {
    /// Email address of the user
    pub email: String,

    /// Token validity in hours
    #[arg(long, default_value_t = 24)]
    pub ttl_hours: i64,
}

pub async fn run(args: ResetPasswordArgs) -> Result<()> {
    let email = EmailAddress::new(&args.email)?;

    let config = DbConfig::from_env()?;
    let pool = pool::create_pool(&config)
        .await
        .context("failed to connect to MySQL")?;

    let user = UserRepo::new(&pool)
        .find_by_email(&email)
        .await
        .with_context(|| format!("no user with email {}", email.as_str()))?;

    let resets = PasswordResetRepo::new(&pool);
    let purged = resets.purge_expired().await?;
    if purged > 0 {
        tracing::info!(purged, "removed expired reset tokens");
    }

    let token = resets.issue(user.id, args.ttl_hours).await?;
    println!("Reset token for {} (valid {}h):", email.as_str(), args.ttl_hours);
    println!("{token}");
    Ok(())
}
