//! `dedupe` - report or remove duplicate directory rows.
//!
//! Dry run by default: prints the duplicate (name, organization) groups
//! and which row a purge would keep. `--apply` performs the delete,
//! keeping the lowest id in each group.

use anyhow::{Context, Result};
use clap::Parser;

use localhub_core::DbConfig;
use localhub_server::db::pool;
use localhub_server::db::repos::DirectoryRepo;
use localhub_server::models::DirectoryKind;

use super::parse_kind;

#[derive(Parser, Debug)]
pub struct DedupeArgs {
    /// Directory to scan: members | partners | businesses.
    /// Omit to scan all three.
    #[arg(value_parser = parse_kind)]
    pub kind: Option<DirectoryKind>,

    /// Actually delete the duplicate rows
    #[arg(long)]
    pub apply: bool,
}

pub async fn run(args: DedupeArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = pool::create_pool(&config)
        .await
        .context("failed to connect to MySQL")?;

    let kinds: Vec<DirectoryKind> = match args.kind {
        Some(kind) => vec![kind],
        None => DirectoryKind::ALL.to_vec(),
    };

    let mut total_extra = 0i64;
    for kind in &kinds {
        let repo = DirectoryRepo::new(&pool, *kind);
        let groups = repo.find_duplicates().await?;

        if groups.is_empty() {
            println!("{kind}: no duplicates");
            continue;
        }

        println!("{kind}: {} duplicate group(s)", groups.len());
        for g in &groups {
            let extra = g.count - 1;
            total_extra += extra;
            println!(
                "  '{}' / '{}': {} rows, would keep id {}",
                g.name, g.organization, g.count, g.keep_id
            );
        }

        if args.apply {
            let removed = repo.remove_duplicates().await?;
            println!("{kind}: removed {removed} row(s)");
        }
    }

    if !args.apply && total_extra > 0 {
        println!();
        println!("{total_extra} row(s) would be removed. Re-run with --apply to delete them.");
    }

    Ok(())
}
