//! HTTP server: router assembly and lifecycle.

pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::init::AppContext;

/// Assemble the full router. With a static directory the root serves the
/// frontend build; without one it serves a JSON service banner.
pub fn build_router(context: Arc<AppContext>, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/predict", post(routes::predict))
        .route("/history", get(routes::history))
        .route("/reset", post(routes::reset))
        .with_state(context.clone());

    let root = match static_dir {
        Some(dir) => {
            let static_files = ServeDir::new(dir).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files)
        }
        None => Router::new()
            .route("/", get(routes::service_info))
            .with_state(context),
    };

    root.merge(api)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run(
    context: Arc<AppContext>,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let app = build_router(context, static_dir);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    info!(">>> {} {}", method, uri);

    let response = next.run(request).await;

    info!(
        "<<< {} ({}ms)",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
