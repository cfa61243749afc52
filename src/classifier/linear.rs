//! Linear model primitives decoded from exported JSON artifacts.
//!
//! Each fitted estimator is reduced to its closed form: a TF-IDF vocabulary
//! with idf weights, a weight vector plus intercept, a per-feature max-abs
//! divisor, or a stack of one-vs-rest weight rows. Inference is plain dot
//! products, no runtime beyond this crate.

use std::collections::HashMap;

use crate::error::SentiraError;
use crate::utils::math::{dot, sigmoid, vector_normalize};

/// TF-IDF vectorizer state exported from a fitted text pipeline.
///
/// Tokens are whitespace splits of already-normalized text; the output vector
/// is term frequency times idf, L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self, SentiraError> {
        for (token, &index) in &vocabulary {
            if index >= idf.len() {
                return Err(SentiraError::Model(format!(
                    "Vocabulary index {} for token '{}' exceeds idf width {}",
                    index,
                    token,
                    idf.len()
                )));
            }
        }
        Ok(Self { vocabulary, idf })
    }

    /// Number of features this vectorizer produces.
    pub fn width(&self) -> usize {
        self.idf.len()
    }

    /// Vectorize normalized text. Unknown tokens contribute nothing; text
    /// with no known tokens yields the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut counts = vec![0.0_f32; self.idf.len()];
        for token in text.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(token) {
                counts[index] += 1.0;
            }
        }
        let weighted: Vec<f32> = counts
            .iter()
            .zip(self.idf.iter())
            .map(|(count, idf)| count * idf)
            .collect();
        vector_normalize(&weighted)
    }
}

/// A self-contained linear text classifier: TF-IDF features through a single
/// weight vector.
///
/// `decision_value` is the raw margin w·x + b; `predict_proba` maps it
/// through the logistic sigmoid. For linear models the exported (coef,
/// intercept) pair gives both forms, so the probabilistic and margin-based
/// sentiment estimators share this type and differ only in their artifacts.
#[derive(Debug, Clone)]
pub struct LinearTextModel {
    vectorizer: TfidfVectorizer,
    coef: Vec<f32>,
    intercept: f32,
}

impl LinearTextModel {
    pub fn new(
        vectorizer: TfidfVectorizer,
        coef: Vec<f32>,
        intercept: f32,
    ) -> Result<Self, SentiraError> {
        if coef.len() != vectorizer.width() {
            return Err(SentiraError::Model(format!(
                "Coefficient width {} does not match vectorizer width {}",
                coef.len(),
                vectorizer.width()
            )));
        }
        Ok(Self {
            vectorizer,
            coef,
            intercept,
        })
    }

    /// Raw decision value w·x + b.
    pub fn decision_value(&self, text: &str) -> f32 {
        let features = self.vectorizer.transform(text);
        dot(&features, &self.coef) + self.intercept
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, text: &str) -> f32 {
        sigmoid(self.decision_value(text))
    }
}

/// Max-abs feature scaler: divides each feature by its per-column divisor.
///
/// Divisors that are non-finite or not strictly positive are sanitized to 1.0
/// at construction, so a degenerate column passes through unchanged.
#[derive(Debug, Clone)]
pub struct MaxAbsScaler {
    scale: Vec<f32>,
}

impl MaxAbsScaler {
    pub fn new(scale: Vec<f32>) -> Self {
        let scale = scale
            .into_iter()
            .map(|s| if s.is_finite() && s > 0.0 { s } else { 1.0 })
            .collect();
        Self { scale }
    }

    pub fn width(&self) -> usize {
        self.scale.len()
    }

    /// Rescale a feature vector. Fails on width mismatch so the caller can
    /// fall back to the unscaled vector.
    pub fn rescale(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        if features.len() != self.scale.len() {
            return Err(SentiraError::Model(format!(
                "Feature width {} does not match scaler width {}",
                features.len(),
                self.scale.len()
            )));
        }
        Ok(features
            .iter()
            .zip(self.scale.iter())
            .map(|(x, s)| x / s)
            .collect())
    }
}

/// One-vs-rest linear ensemble: one (weights, intercept) row per class.
#[derive(Debug, Clone)]
pub struct OvrEnsemble {
    coefs: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl OvrEnsemble {
    pub fn new(coefs: Vec<Vec<f32>>, intercepts: Vec<f32>) -> Result<Self, SentiraError> {
        if coefs.len() != intercepts.len() {
            return Err(SentiraError::Model(format!(
                "Ensemble has {} coefficient rows but {} intercepts",
                coefs.len(),
                intercepts.len()
            )));
        }
        let width = coefs.first().map(|row| row.len()).unwrap_or(0);
        if coefs.iter().any(|row| row.len() != width) {
            return Err(SentiraError::Model(
                "Ensemble coefficient rows have inconsistent widths".to_string(),
            ));
        }
        Ok(Self { coefs, intercepts })
    }

    /// Feature width the ensemble expects.
    pub fn width(&self) -> usize {
        self.coefs.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Number of class rows.
    pub fn class_count(&self) -> usize {
        self.coefs.len()
    }

    /// One raw margin per class row, in row order.
    pub fn margins(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        if features.len() != self.width() {
            return Err(SentiraError::Model(format!(
                "Feature width {} does not match ensemble width {}",
                features.len(),
                self.width()
            )));
        }
        Ok(self
            .coefs
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, intercept)| dot(features, row) + intercept)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_vectorizer() -> TfidfVectorizer {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("good".to_string(), 0);
        vocabulary.insert("bad".to_string(), 1);
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_tfidf_transform_is_l2_normalized() {
        let features = tiny_vectorizer().transform("good good bad");
        let norm: f32 = features.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!(features[0] > features[1]);
    }

    #[test]
    fn test_tfidf_unknown_tokens_yield_zero_vector() {
        let features = tiny_vectorizer().transform("mediocre forgettable");
        assert_eq!(features, vec![0.0, 0.0]);
    }

    #[test]
    fn test_tfidf_rejects_out_of_range_vocabulary() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("good".to_string(), 5);
        assert!(TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).is_err());
    }

    #[test]
    fn test_linear_model_separates_classes() {
        let model = LinearTextModel::new(tiny_vectorizer(), vec![2.0, -2.0], 0.0).unwrap();
        assert!(model.decision_value("good") > 0.0);
        assert!(model.decision_value("bad") < 0.0);
        assert!(model.predict_proba("good") > 0.5);
        assert!(model.predict_proba("bad") < 0.5);
    }

    #[test]
    fn test_linear_model_zero_features_give_intercept() {
        let model = LinearTextModel::new(tiny_vectorizer(), vec![2.0, -2.0], 0.3).unwrap();
        assert!((model.decision_value("unseen words") - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_linear_model_rejects_width_mismatch() {
        assert!(LinearTextModel::new(tiny_vectorizer(), vec![1.0], 0.0).is_err());
    }

    #[test]
    fn test_scaler_divides_by_column_max() {
        let scaler = MaxAbsScaler::new(vec![2.0, 4.0]);
        let scaled = scaler.rescale(&[2.0, 2.0]).unwrap();
        assert_eq!(scaled, vec![1.0, 0.5]);
    }

    #[test]
    fn test_scaler_sanitizes_degenerate_divisors() {
        let scaler = MaxAbsScaler::new(vec![0.0, -3.0, f32::NAN]);
        let scaled = scaler.rescale(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(scaled, vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_scaler_rejects_width_mismatch() {
        let scaler = MaxAbsScaler::new(vec![1.0, 1.0]);
        assert!(scaler.rescale(&[1.0]).is_err());
    }

    #[test]
    fn test_ensemble_margins_row_order() {
        let ensemble = OvrEnsemble::new(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![0.5, -0.5],
        )
        .unwrap();
        let margins = ensemble.margins(&[2.0, 3.0]).unwrap();
        assert_eq!(margins, vec![2.5, 2.5]);
    }

    #[test]
    fn test_ensemble_rejects_ragged_rows() {
        assert!(OvrEnsemble::new(vec![vec![1.0, 0.0], vec![0.0]], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_ensemble_rejects_row_intercept_mismatch() {
        assert!(OvrEnsemble::new(vec![vec![1.0]], vec![0.0, 0.0]).is_err());
    }

    #[test]
    fn test_ensemble_rejects_feature_width_mismatch() {
        let ensemble = OvrEnsemble::new(vec![vec![1.0, 0.0]], vec![0.0]).unwrap();
        assert!(ensemble.margins(&[1.0]).is_err());
    }
}
