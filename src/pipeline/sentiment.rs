//! Sentiment fusion over two independent estimators.
//!
//! The probabilistic arm and the sigmoid-mapped margin arm each yield a
//! probability of positive; the fused score is their arithmetic mean. A
//! failing estimator contributes the neutral 0.5 instead of failing the
//! request, and the substitution is visible in the returned outcome rather
//! than swallowed.

use tracing::debug;

use crate::classifier::SentimentClassifier;
use crate::models::SentimentLabel;

/// Probability substituted when an estimator fails: maximal uncertainty.
const NEUTRAL_PROBABILITY: f32 = 0.5;

/// Outcome of one estimator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimatorOutcome {
    /// The estimator produced this probability.
    Value(f32),
    /// The estimator failed; this is the substituted neutral default.
    Degraded(f32),
}

impl EstimatorOutcome {
    pub fn score(&self) -> f32 {
        match self {
            EstimatorOutcome::Value(p) | EstimatorOutcome::Degraded(p) => *p,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, EstimatorOutcome::Degraded(_))
    }
}

/// Fused sentiment: both per-estimator outcomes plus the combined result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedSentiment {
    pub probabilistic: EstimatorOutcome,
    pub margin: EstimatorOutcome,
    /// Arithmetic mean of the two arm scores.
    pub score: f32,
    pub label: SentimentLabel,
}

impl FusedSentiment {
    /// True when at least one arm substituted the neutral default.
    pub fn is_degraded(&self) -> bool {
        self.probabilistic.is_degraded() || self.margin.is_degraded()
    }
}

async fn run_estimator(classifier: &dyn SentimentClassifier, text: &str) -> EstimatorOutcome {
    match classifier.predict(text).await {
        Ok(probability) => EstimatorOutcome::Value(probability),
        Err(e) => {
            debug!("Sentiment estimator failed, substituting neutral: {}", e);
            EstimatorOutcome::Degraded(NEUTRAL_PROBABILITY)
        }
    }
}

/// Run both estimators on normalized text and fuse their probabilities.
///
/// The label is Positive iff the fused score is at least 0.5, so an exact
/// tie resolves to Positive. Never fails.
pub async fn fuse_sentiment(
    probabilistic: &dyn SentimentClassifier,
    margin: &dyn SentimentClassifier,
    text: &str,
) -> FusedSentiment {
    let probabilistic = run_estimator(probabilistic, text).await;
    let margin = run_estimator(margin, text).await;
    let score = (probabilistic.score() + margin.score()) / 2.0;
    let label = if score >= 0.5 {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    };
    FusedSentiment {
        probabilistic,
        margin,
        score,
        label,
    }
}
