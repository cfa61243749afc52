//! History handler: stored reviews plus their aggregates.

use anyhow::Result;

use crate::aggregate::build_report;
use crate::cli::output::{output_json, print_header, print_hint, print_kv, print_table, OutputMode};
use crate::init::AppContext;
use crate::models::AnalysisResponse;

const REVIEW_PREVIEW_CHARS: usize = 60;

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

pub async fn handle_history(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    let history = ctx.store.load().await;
    let report = build_report(&history, &ctx.influence);

    if mode == OutputMode::Json {
        // Same shape as GET /history.
        output_json(&AnalysisResponse {
            results: history,
            aggregate: report.aggregate,
            global_emotion_chart: report.global_emotion_chart,
            genre_emotion_summary: report.genre_emotion_summary,
            emotion_trend: report.emotion_trend,
        });
        return Ok(());
    }

    if history.is_empty() {
        print_hint("No reviews stored yet.");
        return Ok(());
    }

    print_header("Stored Reviews");
    let rows: Vec<Vec<String>> = history
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                format!("{}", i + 1),
                preview(&r.review, REVIEW_PREVIEW_CHARS),
                r.sentiment.as_str().to_string(),
                r.emotions
                    .first()
                    .map(|e| e.emotion.clone())
                    .unwrap_or_default(),
                r.genres.join(", "),
            ]
        })
        .collect();
    print_table(&["#", "Review", "Sentiment", "Top Emotion", "Genres"], rows);

    if let Some(aggregate) = report.aggregate {
        print_header("Aggregate");
        print_kv("Reviews", &aggregate.review_count.to_string());
        print_kv("Dominant sentiment", aggregate.dominant_sentiment.as_str());
        let rows: Vec<Vec<String>> = report
            .global_emotion_chart
            .iter()
            .map(|e| vec![e.emotion.clone(), format!("{:.3}", e.score)])
            .collect();
        print_table(&["Emotion", "Average"], rows);
    }

    Ok(())
}
