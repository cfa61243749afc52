//! Reset handler: clears the stored history.

use anyhow::Result;

use crate::cli::output::{output_json, print_success, OutputMode};
use crate::init::AppContext;

pub async fn handle_reset(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    ctx.store.clear().await?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "status": "cleared" }));
    } else {
        print_success("History cleared.");
    }
    Ok(())
}
