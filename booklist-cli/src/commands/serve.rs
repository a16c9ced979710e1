//! HTTP server command
//!
//! Connects to PostgreSQL (or keeps rows in memory with `--in-memory`),
//! ensures the schema and serves the book routes until shutdown.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use booklist_server::db::{create_pool_with_options, migrations, pool::DEFAULT_MAX_CONNECTIONS};
use booklist_server::{run_server, AppState, MemoryBookRepo, ServerConfig};

use super::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Per-request deadline in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout: u64,

    /// Do not create the books table on startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Keep books in process memory instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    let state = if args.in_memory {
        tracing::warn!("Serving from in-memory storage, nothing will be persisted");
        AppState::new(MemoryBookRepo::new())
    } else {
        let database_url = resolve_database_url(args.database_url)?;

        let pool = create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        if !args.skip_migrations {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        AppState::from_pool(pool)
    };

    tracing::info!("Starting booklist server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
