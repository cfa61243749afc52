//! Serve handler: runs the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::init::AppContext;

pub async fn handle_serve(
    ctx: Arc<AppContext>,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if !ctx.analyzer.is_available() {
        tracing::warn!("Serving without a model bundle; predictions will be neutral");
    }
    crate::server::run(ctx, host, port, static_dir).await
}
