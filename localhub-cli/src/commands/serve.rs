//! `serve` - run the HTTP API server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use localhub_core::AppConfig;
use localhub_server::db::{migrations, pool};
use localhub_server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides SERVER_HOST/SERVER_PORT)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Allow requests from any origin
    #[arg(long)]
    pub cors_permissive: bool,

    /// Directory served under /static (overrides STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Skip the migration pass on startup
    #[arg(long)]
    pub no_migrate: bool,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = AppConfig::from_env()?;
    let admin_secret = config.require_admin_secret()?.to_owned();

    let pool = pool::create_pool(&config.db)
        .await
        .context("failed to connect to MySQL")?;

    if !args.no_migrate {
        migrations::run(&pool).await?;
    }

    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.bind_addr),
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir.unwrap_or(config.static_dir),
    };

    tracing::info!(
        bind = %server_config.bind_addr,
        database = %config.db.database,
        "starting LocalHub API"
    );

    run_server(pool, server_config, admin_secret).await?;
    Ok(())
}
