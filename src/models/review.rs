//! Per-review analysis types.
//!
//! Field names on the wire are fixed (`Review`, `Genre`, `Sentiment`,
//! `Emotions`, `Summary`); existing chart consumers key on them, so the serde
//! renames here are load-bearing.

use serde::{Deserialize, Serialize};

/// Binary sentiment label produced by the fuser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single emotion display name and its confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    #[serde(rename = "Emotion")]
    pub emotion: String,
    #[serde(rename = "Score")]
    pub score: f32,
}

/// The full analysis result for one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Original review text, as submitted.
    #[serde(rename = "Review")]
    pub review: String,
    /// Resolved genre tags in canonical lowercase form.
    #[serde(rename = "Genre")]
    pub genres: Vec<String>,
    #[serde(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    /// Top emotions sorted by score descending, ties in label order.
    #[serde(rename = "Emotions")]
    pub emotions: Vec<EmotionScore>,
    /// Human-readable one-line summary.
    #[serde(rename = "Summary")]
    pub summary: String,
}

/// Request body for `POST /predict`.
///
/// The batch's `genres` apply to every review in it. Both fields tolerate
/// being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub reviews: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}
