//! booklist CLI - runs the book HTTP service
//!
//! - `serve`: connect to PostgreSQL, ensure the schema, serve HTTP
//! - `migrate`: create the `books` table and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "booklist",
    author,
    version,
    about = "JSON CRUD service for a PostgreSQL books table"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the books table if missing
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so env-backed arguments see it
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}
