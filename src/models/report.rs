//! Cross-review aggregate report types.
//!
//! These are derived views over the stored history, recomputed on every read.
//! The chart-facing field names (`Emotion`, `Points`, `genre`, emotion display
//! names as columns) match what the chart consumers expect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::review::{EmotionScore, ReviewResult, SentimentLabel};

/// One point in a per-emotion time series. `x` is the 1-based submission
/// index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionPoint {
    pub x: usize,
    pub y: f32,
}

/// Ordered score series for one emotion across the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionTrend {
    #[serde(rename = "Emotion")]
    pub emotion: String,
    #[serde(rename = "Points")]
    pub points: Vec<EmotionPoint>,
}

/// One row of the per-genre emotion summary.
///
/// Averages are keyed by emotion display name and flattened next to `genre`,
/// so a row serializes as `{"genre": "horror", "Fear": 0.82, ...}`. The
/// BTreeMap keeps columns in display-name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreEmotionRow {
    pub genre: String,
    #[serde(flatten)]
    pub averages: BTreeMap<String, f32>,
}

/// History-wide rollup: majority sentiment and how many reviews produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub dominant_sentiment: SentimentLabel,
    pub review_count: usize,
}

/// Response body shared by `POST /predict` and `GET /history`.
///
/// `results` covers the batch (or the full stored history); the aggregate
/// fields always cover the full accumulated history. `aggregate` is null when
/// the history is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub results: Vec<ReviewResult>,
    pub aggregate: Option<AggregateReport>,
    pub global_emotion_chart: Vec<EmotionScore>,
    pub genre_emotion_summary: Vec<GenreEmotionRow>,
    pub emotion_trend: Vec<EmotionTrend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_row_flattens_emotion_columns() {
        let mut averages = BTreeMap::new();
        averages.insert("Fear".to_string(), 0.82);
        averages.insert("Anticipation".to_string(), 0.61);
        let row = GenreEmotionRow {
            genre: "horror".to_string(),
            averages,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["genre"], "horror");
        assert_eq!(json["Fear"], 0.82);
        assert_eq!(json["Anticipation"], 0.61);
    }

    #[test]
    fn test_empty_history_serializes_null_aggregate() {
        let response = AnalysisResponse {
            results: vec![],
            aggregate: None,
            global_emotion_chart: vec![],
            genre_emotion_summary: vec![],
            emotion_trend: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["aggregate"].is_null());
        assert_eq!(json["results"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_trend_wire_shape() {
        let trend = EmotionTrend {
            emotion: "Joy".to_string(),
            points: vec![EmotionPoint { x: 1, y: 0.9 }],
        };
        let json = serde_json::to_value(&trend).unwrap();
        assert_eq!(json["Emotion"], "Joy");
        assert_eq!(json["Points"][0]["x"], 1);
        assert_eq!(json["Points"][0]["y"], 0.9);
    }
}
