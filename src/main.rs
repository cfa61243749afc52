//! Sentira - Genre-aware review sentiment and emotion analysis
//!
//! Usage:
//!   sentira serve                        Start the HTTP API server
//!   sentira analyze "text" --genres ...  Analyze a single review
//!   sentira history                      Show stored reviews and aggregates
//!   sentira reset                        Clear the stored history
//!   sentira --help                       Show all commands

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use sentira::cli::output::OutputMode;
use sentira::cli::Cli;
use sentira::init::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sentira=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);

    let ctx = Arc::new(AppContext::new(cli.data_path.clone(), cli.models_path.clone()).await?);
    sentira::cli::execute(&cli.command, ctx, mode).await?;

    Ok(())
}
