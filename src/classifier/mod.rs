//! Classifier seams between the fusion engine and the fitted models.
//!
//! Every model the engine consults sits behind a trait resolved at startup:
//! real implementations wrap pieces of the loaded [`ModelBundle`], noop
//! implementations report unavailable and back degraded mode and tests.

pub mod artifacts;
pub mod linear;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SentiraError;
use crate::labels::GenreRegistry;

pub use artifacts::ModelBundle;
pub use linear::{LinearTextModel, MaxAbsScaler, OvrEnsemble, TfidfVectorizer};

/// Probability-of-positive estimator over normalized review text.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Probability of positive sentiment in [0, 1].
    async fn predict(&self, text: &str) -> Result<f32, SentiraError>;

    /// Whether a fitted model backs this classifier.
    fn is_available(&self) -> bool;
}

/// Turns normalized text plus resolved genre tags into the combined feature
/// vector (TF-IDF sub-vector followed by the genre multi-hot sub-vector).
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    async fn vectorize(&self, text: &str, genres: &[String]) -> Result<Vec<f32>, SentiraError>;

    fn is_available(&self) -> bool;
}

/// Best-effort feature rescaling. Callers fall back to the unscaled vector
/// when this fails.
#[async_trait]
pub trait FeatureScaler: Send + Sync {
    async fn transform(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError>;

    fn is_available(&self) -> bool;
}

/// One-vs-rest margins over the combined feature vector, one per emotion in
/// label order.
#[async_trait]
pub trait EmotionEnsemble: Send + Sync {
    async fn margins(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError>;

    fn is_available(&self) -> bool;
}

/// Sentiment classifier backed by a linear text model.
///
/// Both fusion arms use this type: a logistic model's predict_proba and a
/// margin model's sigmoid-mapped decision value reduce to the same closed
/// form over (coef, intercept), so the two arms differ only in their
/// artifacts.
pub struct LinearSentimentClassifier {
    model: LinearTextModel,
}

impl LinearSentimentClassifier {
    pub fn new(model: LinearTextModel) -> Self {
        Self { model }
    }
}

#[async_trait]
impl SentimentClassifier for LinearSentimentClassifier {
    async fn predict(&self, text: &str) -> Result<f32, SentiraError> {
        Ok(self.model.predict_proba(text))
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Feature extractor concatenating the emotion TF-IDF vector with the genre
/// multi-hot encoding.
pub struct TfidfGenreExtractor {
    tfidf: TfidfVectorizer,
    registry: Arc<GenreRegistry>,
}

impl TfidfGenreExtractor {
    pub fn new(tfidf: TfidfVectorizer, registry: Arc<GenreRegistry>) -> Self {
        Self { tfidf, registry }
    }
}

#[async_trait]
impl FeatureExtractor for TfidfGenreExtractor {
    async fn vectorize(&self, text: &str, genres: &[String]) -> Result<Vec<f32>, SentiraError> {
        let mut features = self.tfidf.transform(text);
        features.extend(self.registry.multi_hot(genres));
        Ok(features)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Scaler seam over the fitted max-abs divisors.
pub struct MaxAbsFeatureScaler {
    scaler: MaxAbsScaler,
}

impl MaxAbsFeatureScaler {
    pub fn new(scaler: MaxAbsScaler) -> Self {
        Self { scaler }
    }
}

#[async_trait]
impl FeatureScaler for MaxAbsFeatureScaler {
    async fn transform(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        self.scaler.rescale(features)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Ensemble seam over the fitted one-vs-rest rows.
pub struct LinearEmotionEnsemble {
    model: OvrEnsemble,
}

impl LinearEmotionEnsemble {
    pub fn new(model: OvrEnsemble) -> Self {
        Self { model }
    }
}

#[async_trait]
impl EmotionEnsemble for LinearEmotionEnsemble {
    async fn margins(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        self.model.margins(features)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// The full classifier set the engine consults, wired once at startup.
#[derive(Clone)]
pub struct ClassifierSet {
    pub sentiment_probabilistic: Arc<dyn SentimentClassifier>,
    pub sentiment_margin: Arc<dyn SentimentClassifier>,
    pub features: Arc<dyn FeatureExtractor>,
    pub scaler: Arc<dyn FeatureScaler>,
    pub ensemble: Arc<dyn EmotionEnsemble>,
}

impl ClassifierSet {
    /// Wire real classifiers from a loaded bundle.
    ///
    /// A bundle without a scaler gets the noop scaler; the engine passes the
    /// unscaled vector through when it errors.
    pub fn from_bundle(bundle: ModelBundle, registry: Arc<GenreRegistry>) -> Self {
        let scaler: Arc<dyn FeatureScaler> = match bundle.scaler {
            Some(scaler) => Arc::new(MaxAbsFeatureScaler::new(scaler)),
            None => Arc::new(NoopFeatureScaler::new()),
        };
        Self {
            sentiment_probabilistic: Arc::new(LinearSentimentClassifier::new(
                bundle.sentiment_logistic,
            )),
            sentiment_margin: Arc::new(LinearSentimentClassifier::new(bundle.sentiment_margin)),
            features: Arc::new(TfidfGenreExtractor::new(bundle.emotion_tfidf, registry)),
            scaler,
            ensemble: Arc::new(LinearEmotionEnsemble::new(bundle.emotion_ensemble)),
        }
    }

    /// Wire noop classifiers for degraded mode.
    pub fn noop() -> Self {
        Self {
            sentiment_probabilistic: Arc::new(NoopSentimentClassifier::new()),
            sentiment_margin: Arc::new(NoopSentimentClassifier::new()),
            features: Arc::new(NoopFeatureExtractor::new()),
            scaler: Arc::new(NoopFeatureScaler::new()),
            ensemble: Arc::new(NoopEmotionEnsemble::new()),
        }
    }

    /// Whether the mandatory seams are model-backed. The optional scaler
    /// does not count against readiness.
    pub fn is_available(&self) -> bool {
        self.sentiment_probabilistic.is_available()
            && self.sentiment_margin.is_available()
            && self.features.is_available()
            && self.ensemble.is_available()
    }
}

// ============================================================================
// Noop implementations
// ============================================================================

/// No-op sentiment classifier for degraded mode and tests.
pub struct NoopSentimentClassifier;

impl Default for NoopSentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopSentimentClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for NoopSentimentClassifier {
    async fn predict(&self, _text: &str) -> Result<f32, SentiraError> {
        Err(SentiraError::Model(
            "Sentiment classifier is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// No-op feature extractor for degraded mode and tests.
pub struct NoopFeatureExtractor;

impl Default for NoopFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopFeatureExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeatureExtractor for NoopFeatureExtractor {
    async fn vectorize(&self, _text: &str, _genres: &[String]) -> Result<Vec<f32>, SentiraError> {
        Err(SentiraError::Model(
            "Feature extractor is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// No-op feature scaler, also used for bundles shipped without one.
pub struct NoopFeatureScaler;

impl Default for NoopFeatureScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopFeatureScaler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeatureScaler for NoopFeatureScaler {
    async fn transform(&self, _features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        Err(SentiraError::Model(
            "Feature scaler is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// No-op emotion ensemble for degraded mode and tests.
pub struct NoopEmotionEnsemble;

impl Default for NoopEmotionEnsemble {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopEmotionEnsemble {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmotionEnsemble for NoopEmotionEnsemble {
    async fn margins(&self, _features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        Err(SentiraError::Model(
            "Emotion ensemble is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}
