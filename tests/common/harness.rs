//! Test harness for isolated data directories and deterministic classifiers.
#![allow(dead_code)] // Each test binary uses a different subset.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use sentira::classifier::{
    ClassifierSet, EmotionEnsemble, FeatureExtractor, FeatureScaler, SentimentClassifier,
};
use sentira::config::{AppConfig, PipelineConfig};
use sentira::error::SentiraError;
use sentira::init::AppContext;
use sentira::labels::{EmotionLabel, GenreRegistry};
use sentira::pipeline::{GenreInfluenceTable, ReviewAnalyzer};
use sentira::store::HistoryStore;

/// Sentiment stub returning a fixed probability.
pub struct FixedSentiment(pub f32);

#[async_trait]
impl SentimentClassifier for FixedSentiment {
    async fn predict(&self, _text: &str) -> Result<f32, SentiraError> {
        Ok(self.0)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Feature stub yielding a constant two-dimensional vector.
pub struct FixedExtractor;

#[async_trait]
impl FeatureExtractor for FixedExtractor {
    async fn vectorize(&self, _text: &str, _genres: &[String]) -> Result<Vec<f32>, SentiraError> {
        Ok(vec![1.0, 0.0])
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Scaler stub that passes features through unchanged.
pub struct PassScaler;

#[async_trait]
impl FeatureScaler for PassScaler {
    async fn transform(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        Ok(features.to_vec())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Ensemble stub returning fixed margins.
pub struct FixedEnsemble(pub Vec<f32>);

#[async_trait]
impl EmotionEnsemble for FixedEnsemble {
    async fn margins(&self, _features: &[f32]) -> Result<Vec<f32>, SentiraError> {
        Ok(self.0.clone())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Equal margins: every emotion equally likely before influence and boosts.
pub fn uniform_margins() -> Vec<f32> {
    vec![0.0; EmotionLabel::COUNT]
}

/// Test harness wiring a full [`AppContext`] over a temporary directory.
///
/// The directory is cleaned up when the harness drops.
pub struct TestHarness {
    pub context: Arc<AppContext>,
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Harness with deterministic stub classifiers.
    pub fn with_stubs(positive: f32, margins: Vec<f32>) -> Self {
        let classifiers = ClassifierSet {
            sentiment_probabilistic: Arc::new(FixedSentiment(positive)),
            sentiment_margin: Arc::new(FixedSentiment(positive)),
            features: Arc::new(FixedExtractor),
            scaler: Arc::new(PassScaler),
            ensemble: Arc::new(FixedEnsemble(margins)),
        };
        Self::build(classifiers)
    }

    /// Harness running in degraded mode (noop classifiers).
    pub fn degraded() -> Self {
        Self::build(ClassifierSet::noop())
    }

    fn build(classifiers: ClassifierSet) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = Arc::new(GenreRegistry::default_catalog());
        let influence = Arc::new(GenreInfluenceTable::new());
        let config = AppConfig {
            data_path: temp_dir.path().to_path_buf(),
            models_path: temp_dir.path().join("models"),
            pipeline: PipelineConfig::default(),
        };

        let analyzer = Arc::new(ReviewAnalyzer::new(
            classifiers,
            registry.clone(),
            influence.clone(),
            config.pipeline.clone(),
        ));
        let store = Arc::new(HistoryStore::load_or_create(
            &config.data_path.join("history.json"),
        ));

        let context = Arc::new(AppContext {
            config,
            analyzer,
            store,
            influence,
            registry,
        });
        Self { context, temp_dir }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }
}
