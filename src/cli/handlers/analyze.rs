//! Analyze handler: one review through the pipeline.

use anyhow::Result;
use colored::Colorize;

use crate::cli::output::{output_json, print_hint, print_kv, print_table, OutputMode};
use crate::init::AppContext;
use crate::models::SentimentLabel;

/// Split a comma-separated genre list into raw tags. Resolution against the
/// registry happens inside the analyzer.
fn parse_genres(list: Option<&str>) -> Vec<String> {
    list.map(|list| {
        list.split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn handle_analyze(
    ctx: &AppContext,
    review: &str,
    genres: Option<&str>,
    no_store: bool,
    mode: OutputMode,
) -> Result<()> {
    let review = review.trim();
    if review.is_empty() {
        anyhow::bail!("Review text is empty");
    }

    let genres = parse_genres(genres);
    let result = ctx.analyzer.analyze(review, &genres).await;

    if !no_store {
        ctx.store.append(std::slice::from_ref(&result)).await?;
    }

    if mode == OutputMode::Json {
        output_json(&result);
        return Ok(());
    }

    if !ctx.analyzer.is_available() {
        print_hint("Model bundle not loaded; scores are neutral.");
    }

    let sentiment = match result.sentiment {
        SentimentLabel::Positive => "Positive".green().to_string(),
        SentimentLabel::Negative => "Negative".red().to_string(),
    };
    print_kv("Sentiment", &sentiment);
    if !result.genres.is_empty() {
        print_kv("Genres", &result.genres.join(", "));
    }
    println!();

    let rows: Vec<Vec<String>> = result
        .emotions
        .iter()
        .map(|e| vec![e.emotion.clone(), format!("{:.3}", e.score)])
        .collect();
    print_table(&["Emotion", "Confidence"], rows);

    println!("{}", result.summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genres_splits_and_trims() {
        let genres = parse_genres(Some("Horror, thriller , "));
        assert_eq!(genres, vec!["Horror".to_string(), "thriller".to_string()]);
    }

    #[test]
    fn test_parse_genres_none_is_empty() {
        assert!(parse_genres(None).is_empty());
    }
}
