//! CLI subcommand implementations.

pub mod dedupe;
pub mod diagnose;
pub mod migrate;
pub mod reconcile;
pub mod reset_password;
pub mod seed;
pub mod serve;

use localhub_server::models::DirectoryKind;

/// clap value parser for directory kinds.
pub(crate) fn parse_kind(s: &str) -> Result<DirectoryKind, String> {
    DirectoryKind::parse(s).map_err(|e| e.to_string())
}
