//! localhub CLI - API server and database operations tooling
//!
//! This is the main entry point for the localhub command-line tool:
//! - API server (`serve` subcommand)
//! - Schema migrations (`migrate`)
//! - Demo-data seeding (`seed`)
//! - Connection diagnostics (`diagnose`)
//! - Directory duplicate management (`dedupe`)
//! - DB-vs-API count reconciliation (`reconcile`)
//! - Password reset token issuance (`reset-password`)

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "localhub",
    author,
    version,
    about = "Business directory and content hub - API server and ops tooling",
    long_about = "Run the LocalHub HTTP API or operate on its MySQL schema: migrations, \
                  seeding, connection diagnostics, duplicate cleanup, and count reconciliation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Run schema migrations and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Populate demo data (reruns skip duplicate rows)
    Seed(commands::seed::SeedArgs),
    /// Connection diagnostics: server version and per-table row counts
    Diagnose(commands::diagnose::DiagnoseArgs),
    /// Report or remove duplicate directory rows
    Dedupe(commands::dedupe::DedupeArgs),
    /// Compare raw table counts against API responses
    Reconcile(commands::reconcile::ReconcileArgs),
    /// Issue a password reset token for a user
    ResetPassword(commands::reset_password::ResetPasswordArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env supplies DB_* and JWT_SECRET in development
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Migrate(args) => commands::migrate::run(args).await?,
        Commands::Seed(args) => commands::seed::run(args).await?,
        Commands::Diagnose(args) => commands::diagnose::run(args).await?,
        Commands::Dedupe(args) => commands::dedupe::run(args).await?,
        Commands::Reconcile(args) => commands::reconcile::run(args).await?,
        Commands::ResetPassword(args) => commands::reset_password::run(args).await?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
