//! `reconcile` - compare raw table counts against API responses.
//!
//! For each directory kind, takes a COUNT(*) straight from the table and
//! fetches `/api/directory/{kind}/count` from a running server, then
//! reports any mismatch. The two should only disagree when the API is
//! pointed at a different database than the one configured here.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use localhub_core::DbConfig;
use localhub_server::db::pool;
use localhub_server::db::repos::DirectoryRepo;
use localhub_server::models::DirectoryKind;

#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Base URL of the running API server
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub api_url: String,
}

#[derive(Deserialize)]
struct CountResponse {
    count: i64,
}

pub async fn run(args: ReconcileArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = pool::create_pool(&config)
        .await
        .context("failed to connect to MySQL")?;

    let client = reqwest::Client::new();
    let base = args.api_url.trim_end_matches('/');

    let mut mismatches = 0;
    for kind in DirectoryKind::ALL {
        let db_count = DirectoryRepo::new(&pool, kind).count().await?;

        let url = format!("{base}/api/directory/{kind}/count");
        let api_count = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed - is the server running?"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?
            .json::<CountResponse>()
            .await
            .context("count response was not valid JSON")?
            .count;

        if db_count == api_count {
            println!("{kind}: OK ({db_count})");
        } else {
            mismatches += 1;
            println!("{kind}: MISMATCH - table has {db_count}, API reports {api_count}");
        }
    }

    if mismatches > 0 {
        anyhow::bail!(
            "{mismatches} directory count(s) out of sync - \
             check that the API and CLI share the same DB_* settings"
        );
    }

    println!("All directory counts reconciled.");
    Ok(())
}
