//! Emotion distribution building: feature vector to calibrated probabilities.
//!
//! Feature extraction and ensemble inference each fail soft. A failed
//! extraction or ensemble call falls back to the all-zero margin vector,
//! which softmax turns into the uniform distribution; a failed scaler passes
//! the unscaled vector through.

use tracing::debug;

use crate::classifier::{EmotionEnsemble, FeatureExtractor, FeatureScaler};
use crate::labels::EmotionLabel;
use crate::utils::math::softmax;

/// The all-zero margin vector substituted on inference failure.
pub fn neutral_margins() -> Vec<f32> {
    vec![0.0; EmotionLabel::COUNT]
}

/// Produce the temperature-calibrated emotion distribution for one review.
///
/// The output has one probability per [`EmotionLabel`] in label order and
/// sums to 1. Never fails.
pub async fn build_distribution(
    features: &dyn FeatureExtractor,
    scaler: &dyn FeatureScaler,
    ensemble: &dyn EmotionEnsemble,
    text: &str,
    genres: &[String],
    temperature: f32,
) -> Vec<f32> {
    let margins = raw_margins(features, scaler, ensemble, text, genres).await;
    softmax(&margins, temperature)
}

async fn raw_margins(
    features: &dyn FeatureExtractor,
    scaler: &dyn FeatureScaler,
    ensemble: &dyn EmotionEnsemble,
    text: &str,
    genres: &[String],
) -> Vec<f32> {
    let vector = match features.vectorize(text, genres).await {
        Ok(vector) => vector,
        Err(e) => {
            debug!("Feature extraction failed, using neutral margins: {}", e);
            return neutral_margins();
        }
    };

    let scaled = match scaler.transform(&vector).await {
        Ok(scaled) => scaled,
        Err(_) => vector,
    };

    match ensemble.margins(&scaled).await {
        Ok(margins) if margins.len() == EmotionLabel::COUNT => margins,
        Ok(margins) => {
            debug!(
                "Ensemble returned {} margins, expected {}; using neutral margins",
                margins.len(),
                EmotionLabel::COUNT
            );
            neutral_margins()
        }
        Err(e) => {
            debug!("Ensemble inference failed, using neutral margins: {}", e);
            neutral_margins()
        }
    }
}
