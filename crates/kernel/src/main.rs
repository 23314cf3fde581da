//! AdminLTE admin site
//!
//! HTTP server for the admin views, plus a few offline commands.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use adminlte_kernel::{AppState, Config, cli, routes};

/// AdminLTE admin site.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Print the admin URL table.
    Routes,

    /// Print an Argon2 hash for the users file.
    HashPassword {
        /// Password to hash.
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Routes => {
            let config = Config::from_env().context("failed to load configuration")?;
            cli::cmd_routes(&config.admin_prefix)
        }
        Command::HashPassword { password } => cli::cmd_hash_password(&password),
    }
}

async fn serve() -> Result<()> {
    init_tracing();

    info!("Starting admin site");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, prefix = %config.admin_prefix, "Configuration loaded");

    let state = AppState::new(&config).context("failed to initialize application state")?;

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
