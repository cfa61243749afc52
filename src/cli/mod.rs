//! CLI interface for Sentira.

pub mod handlers;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::init::AppContext;
use output::OutputMode;

/// Sentira - Genre-aware review sentiment and emotion analysis
#[derive(Parser)]
#[command(name = "sentira", version, about, long_about = None)]
pub struct Cli {
    /// Override data directory (default: ~/.sentira)
    #[arg(long, env = "SENTIRA_DATA_PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Override model artifacts directory (default: {data}/models)
    #[arg(long, env = "SENTIRA_MODELS_PATH", global = true)]
    pub models_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,
        /// Serve a built frontend from this directory at /
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Analyze a single review
    Analyze {
        /// Review text
        review: String,
        /// Comma-separated genre tags (e.g. "horror,thriller")
        #[arg(long)]
        genres: Option<String>,
        /// Do not store the result in history
        #[arg(long)]
        no_store: bool,
    },

    /// Show stored reviews and aggregate emotion charts
    History,

    /// Clear the stored history
    Reset,
}

/// Execute a CLI command.
pub async fn execute(command: &Commands, ctx: Arc<AppContext>, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => handlers::serve::handle_serve(ctx, host, *port, static_dir.clone()).await,
        Commands::Analyze {
            review,
            genres,
            no_store,
        } => handlers::analyze::handle_analyze(&ctx, review, genres.as_deref(), *no_store, mode).await,
        Commands::History => handlers::history::handle_history(&ctx, mode).await,
        Commands::Reset => handlers::reset::handle_reset(&ctx, mode).await,
    }
}
