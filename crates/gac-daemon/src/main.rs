//! # gac
//!
//! Commits each saved file on its own and synchronizes the repository.
//!
//! - `gac watch` (default): watch the workspace and handle every write
//! - `gac save <path>...`: handle saves reported by an editor hook
//! - `gac status`: show what the provider sees and how it classifies it
//!
//! Nothing happens until `.gac/config.toml` enables at least one kind:
//! ```toml
//! [git-auto-commit]
//! events = ["modify", "create", "delete"]
//! ```

mod activation;
mod commands;
mod watcher;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Auto-commit saved files.
#[derive(Parser)]
#[command(name = "gac", version, about)]
struct Cli {
    /// Workspace folder; repeat for multi-root workspaces (defaults to current directory).
    #[arg(long = "workspace", global = true)]
    workspaces: Vec<PathBuf>,

    /// Configuration file (defaults to <first workspace>/.gac/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the workspace and auto-commit on every save.
    Watch,
    /// Handle save events for the given files, then exit.
    Save {
        /// Files that were just written.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print repositories, their changes and the kind each maps to.
    Status,
}

fn init_logging(json: bool) -> Result<()> {
    // Logs go to stderr so `save` and `status` output stays parseable.
    let filter = EnvFilter::from_default_env()
        .add_directive("gac_core=info".parse()?)
        .add_directive("gac_vcs=info".parse()?)
        .add_directive("gac_daemon=info".parse()?);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json)?;

    let workspaces = if cli.workspaces.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        cli.workspaces.clone()
    };

    let Some(host) = activation::activate(&workspaces, cli.config.as_deref()).await? else {
        return Ok(());
    };

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => commands::watch::execute(&host).await,
        Commands::Save { paths } => commands::save::execute(&host, &paths).await,
        Commands::Status => commands::status::execute(&host).await,
    }
}
