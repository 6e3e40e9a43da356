//! `diagnose` - connection diagnostics.
//!
//! Connects with the configured credentials, reports the server version,
//! then prints a per-table row count. Useful first stop when the API
//! returns 500s: an ER_ACCESS_DENIED_ERROR shows up here as a clear
//! credentials message instead of a generic pool failure.

use anyhow::Result;
use clap::Parser;

use localhub_core::{DbConfig, HubError};
use localhub_server::db::{migrations, pool};

#[derive(Parser, Debug)]
pub struct DiagnoseArgs {}

pub async fn run(_args: DiagnoseArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    println!(
        "Connecting to mysql://{}@{}:{}/{} (ssl: {})",
        config.user, config.host, config.port, config.database, config.ssl
    );

    let pool = match pool::create_pool(&config).await {
        Ok(pool) => pool,
        Err(HubError::AccessDenied { detail }) => {
            anyhow::bail!("access denied - check DB_USER/DB_PASSWORD: {detail}");
        }
        Err(e) => return Err(e.into()),
    };

    let (version,): (String,) = sqlx::query_as("SELECT VERSION()").fetch_one(&pool).await?;
    println!("Connected. Server version: {version}");
    println!();

    for table in migrations::TABLES {
        match sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
        {
            Ok((count,)) => println!("  {table:<24} {count:>8} rows"),
            Err(_) => println!("  {table:<24}  MISSING (run `localhub migrate`)"),
        }
    }

    Ok(())
}
