//! HTTP handlers for the analysis API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::aggregate::{build_report, HistoryReport};
use crate::init::AppContext;
use crate::models::{AnalysisResponse, PredictRequest, ReviewResult};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    model_available: bool,
    reviews_stored: usize,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: message })).into_response()
}

fn analysis_response(results: Vec<ReviewResult>, report: HistoryReport) -> AnalysisResponse {
    AnalysisResponse {
        results,
        aggregate: report.aggregate,
        global_emotion_chart: report.global_emotion_chart,
        genre_emotion_summary: report.genre_emotion_summary,
        emotion_trend: report.emotion_trend,
    }
}

/// POST /predict: analyze a batch of reviews against a shared genre list.
///
/// Blank reviews are dropped before analysis; a request with nothing left
/// is a 400 and never reaches the engine. The response carries the new
/// results plus aggregates recomputed over the full stored history.
pub async fn predict(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let reviews: Vec<String> = request
        .reviews
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(|r| r.to_string())
        .collect();
    if reviews.is_empty() {
        return bad_request("No reviews provided");
    }

    let results = ctx.analyzer.analyze_batch(&reviews, &request.genres).await;
    let history = match ctx.store.append(&results).await {
        Ok(history) => history,
        Err(e) => {
            error!("Failed to persist results: {}", e);
            return internal_error(e.to_string());
        }
    };

    let report = build_report(&history, &ctx.influence);
    Json(analysis_response(results, report)).into_response()
}

/// GET /history: the full stored history plus its aggregates.
pub async fn history(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    let history = ctx.store.load().await;
    let report = build_report(&history, &ctx.influence);
    Json(analysis_response(history, report))
}

/// POST /reset: clear the stored history.
pub async fn reset(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.store.clear().await {
        Ok(()) => Json(StatusBody { status: "cleared" }).into_response(),
        Err(e) => {
            error!("Failed to clear history: {}", e);
            internal_error(e.to_string())
        }
    }
}

/// GET /: service banner served when no static frontend is configured.
pub async fn service_info(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    Json(ServiceInfo {
        service: "sentira",
        version: env!("CARGO_PKG_VERSION"),
        model_available: ctx.analyzer.is_available(),
        reviews_stored: ctx.store.len().await,
    })
}
