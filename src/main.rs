//! Circuledge - Main Server
//!
//! Collaborative notes backend on PostgreSQL and Meilisearch.

use anyhow::Result;
use circuledge::{AppState, Config};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "circuledge")]
#[command(about = "Collaborative notes backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (overrides config.yaml and SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Rebuild the search projection of a note from its revision history
    Repair {
        /// Note id
        #[arg(short, long)]
        note: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,circuledge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            circuledge::start_server(config).await
        }
        Commands::Repair { note } => run_repair(config, note).await,
    }
}

async fn run_repair(config: Config, note: Uuid) -> Result<()> {
    let state = AppState::new(config).await?;
    tracing::info!("Connected to databases");

    state.note_manager().repair_note(note).await?;
    tracing::info!(note_id = %note, "Repair complete");
    Ok(())
}
