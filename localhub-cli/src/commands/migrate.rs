//! `migrate` - run schema migrations and exit.

use anyhow::{Context, Result};
use clap::Parser;

use localhub_core::DbConfig;
use localhub_server::db::{migrations, pool};

#[derive(Parser, Debug)]
pub struct MigrateArgs {}

pub async fn run(_args: MigrateArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = pool::create_pool(&config)
        .await
        .context("failed to connect to MySQL")?;

    migrations::run(&pool).await?;

    println!("Migrations complete. {} tables ensured.", migrations::TABLES.len());
    Ok(())
}
