use anyhow::anyhow;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use preflight_cli::{run_check, CheckOptions};
use preflight_config::constants;

#[derive(Parser)]
#[command(name = "preflight")]
#[command(about = "Preflight - deployment upgrade compatibility checker")]
#[command(version)]
struct Cli {
    /// Path to the deployment's key-value configuration file
    #[arg(long)]
    config: PathBuf,

    /// Path to the target codebase's migration manifest (JSON)
    #[arg(long)]
    manifest: PathBuf,

    /// Postgres connection URL; falls back to PREFLIGHT_DATABASE_URL or DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Version string of the currently-running deployment (diagnostics only)
    #[arg(long, default_value = "unknown")]
    deployed_version: String,

    /// Version string being deployed (diagnostics only)
    #[arg(long, default_value = "unknown")]
    target_version: String,
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = resolve_database_url(cli.database_url).ok_or_else(|| {
        anyhow!(
            "no database URL provided; pass --database-url or set {}",
            constants::PREFLIGHT_DATABASE_URL
        )
    })?;

    let options = CheckOptions {
        config_path: cli.config,
        manifest_path: cli.manifest,
        database_url,
        deployed_version: cli.deployed_version,
        target_version: cli.target_version,
    };

    run_check(&options).await?;
    Ok(())
}

fn resolve_database_url(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(constants::PREFLIGHT_DATABASE_URL).ok())
        .or_else(|| std::env::var(constants::DATABASE_URL).ok())
        .filter(|url| !url.is_empty())
}
