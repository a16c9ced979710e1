//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use booklist_server::db::{connect, migrations};

use super::resolve_database_url;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create the books table and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    let pool = connect(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
