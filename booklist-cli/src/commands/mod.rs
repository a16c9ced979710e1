//! Subcommand implementations

use anyhow::{Context, Result};

pub mod migrate;
pub mod serve;

/// Environment variable used by older deployments of the service.
const LEGACY_URL_VAR: &str = "ELEPHANTSQL_URL";

/// Resolve the database URL from `--database-url` / `DATABASE_URL`, falling
/// back to the legacy variable.
pub fn resolve_database_url(arg: Option<String>) -> Result<String> {
    pick_database_url(arg, std::env::var(LEGACY_URL_VAR).ok())
}

fn pick_database_url(arg: Option<String>, legacy: Option<String>) -> Result<String> {
    let present = |url: &String| !url.trim().is_empty();
    arg.filter(present)
        .or_else(|| legacy.filter(present))
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL or ELEPHANTSQL_URL env, or .env")
}
