//! The analysis engine: runs one review through the full fusion pipeline.

use std::sync::Arc;

use tracing::debug;

use crate::classifier::ClassifierSet;
use crate::config::PipelineConfig;
use crate::labels::GenreRegistry;
use crate::models::{EmotionScore, ReviewResult, SentimentLabel};
use crate::pipeline::confidence::{normalize_confidence, rank_top_emotions};
use crate::pipeline::distribution::build_distribution;
use crate::pipeline::genre::{apply_influence, GenreInfluenceTable};
use crate::pipeline::lexical::{
    apply_keyword_boosts, apply_surprise_floor, apply_surprise_genre_boost,
};
use crate::pipeline::normalize::normalize;
use crate::pipeline::sentiment::fuse_sentiment;

/// Orchestrates the per-review stages: normalization, dual sentiment fusion,
/// emotion distribution, genre influence, lexical boosts, and confidence
/// banding. Every stage degrades instead of failing, so `analyze` always
/// returns a complete result.
pub struct ReviewAnalyzer {
    classifiers: ClassifierSet,
    registry: Arc<GenreRegistry>,
    influence: Arc<GenreInfluenceTable>,
    config: PipelineConfig,
}

impl ReviewAnalyzer {
    pub fn new(
        classifiers: ClassifierSet,
        registry: Arc<GenreRegistry>,
        influence: Arc<GenreInfluenceTable>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifiers,
            registry,
            influence,
            config,
        }
    }

    /// Whether fitted models back the pipeline. False means every result is
    /// produced in degraded mode (neutral sentiment, uniform emotions).
    pub fn is_available(&self) -> bool {
        self.classifiers.is_available()
    }

    pub fn registry(&self) -> &Arc<GenreRegistry> {
        &self.registry
    }

    /// Analyze a single review against a shared genre list.
    pub async fn analyze(&self, review: &str, raw_genres: &[String]) -> ReviewResult {
        let normalized = normalize(review);
        let genres = self.registry.resolve(raw_genres);

        let sentiment = fuse_sentiment(
            self.classifiers.sentiment_probabilistic.as_ref(),
            self.classifiers.sentiment_margin.as_ref(),
            &normalized,
        )
        .await;

        let mut scores = build_distribution(
            self.classifiers.features.as_ref(),
            self.classifiers.scaler.as_ref(),
            self.classifiers.ensemble.as_ref(),
            &normalized,
            &genres,
            self.config.temperature,
        )
        .await;

        if let Some(influence) = self.influence.influence_vector(&genres) {
            scores = apply_influence(&scores, &influence, self.config.genre_mix_weight);
        }

        let keyword_hits = apply_keyword_boosts(&mut scores, &normalized, self.config.keyword_boost);
        apply_surprise_genre_boost(&mut scores, &genres, self.config.surprise_genre_boost);
        apply_surprise_floor(
            &mut scores,
            self.config.surprise_floor_ratio,
            self.config.surprise_damping,
        );

        let confidences = normalize_confidence(&scores, self.config.confidence_floor);
        let emotions = rank_top_emotions(&confidences, self.config.top_emotions);
        let summary = compose_summary(sentiment.label, &emotions, &genres);

        debug!(
            sentiment = %sentiment.label,
            score = sentiment.score,
            degraded = sentiment.is_degraded(),
            keyword_hits,
            top = emotions.first().map(|e| e.emotion.as_str()).unwrap_or("-"),
            "Analyzed review"
        );

        ReviewResult {
            review: review.trim().to_string(),
            genres,
            sentiment: sentiment.label,
            emotions,
            summary,
        }
    }

    /// Analyze a batch of reviews sharing one genre list, preserving input
    /// order.
    pub async fn analyze_batch(&self, reviews: &[String], raw_genres: &[String]) -> Vec<ReviewResult> {
        let mut results = Vec::with_capacity(reviews.len());
        for review in reviews {
            results.push(self.analyze(review, raw_genres).await);
        }
        results
    }
}

/// One-sentence verdict naming the sentiment and the top two emotions, plus
/// a genre note when genre context shaped the scores.
pub(crate) fn compose_summary(
    sentiment: SentimentLabel,
    emotions: &[EmotionScore],
    genres: &[String],
) -> String {
    let dominant = emotions
        .iter()
        .take(2)
        .map(|e| e.emotion.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut summary = format!(
        "This review is detected as {}, with dominant emotions: {}.",
        sentiment, dominant
    );
    if !genres.is_empty() {
        summary.push_str(&format!(
            " Genre(s) {} automatically influence emotional interpretation.",
            genres.join(", ")
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::classifier::{
        EmotionEnsemble, FeatureExtractor, FeatureScaler, SentimentClassifier,
    };
    use crate::error::SentiraError;
    use crate::labels::EmotionLabel;

    struct FixedSentiment(f32);

    #[async_trait]
    impl SentimentClassifier for FixedSentiment {
        async fn predict(&self, _text: &str) -> Result<f32, SentiraError> {
            Ok(self.0)
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct FixedExtractor;

    #[async_trait]
    impl FeatureExtractor for FixedExtractor {
        async fn vectorize(&self, _text: &str, _genres: &[String]) -> Result<Vec<f32>, SentiraError> {
            Ok(vec![1.0, 0.0])
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct PassScaler;

    #[async_trait]
    impl FeatureScaler for PassScaler {
        async fn transform(&self, features: &[f32]) -> Result<Vec<f32>, SentiraError> {
            Ok(features.to_vec())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct FixedEnsemble(Vec<f32>);

    #[async_trait]
    impl EmotionEnsemble for FixedEnsemble {
        async fn margins(&self, _features: &[f32]) -> Result<Vec<f32>, SentiraError> {
            Ok(self.0.clone())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn analyzer_with(
        positive: f32,
        margins: Vec<f32>,
        config: PipelineConfig,
    ) -> ReviewAnalyzer {
        let classifiers = ClassifierSet {
            sentiment_probabilistic: Arc::new(FixedSentiment(positive)),
            sentiment_margin: Arc::new(FixedSentiment(positive)),
            features: Arc::new(FixedExtractor),
            scaler: Arc::new(PassScaler),
            ensemble: Arc::new(FixedEnsemble(margins)),
        };
        ReviewAnalyzer::new(
            classifiers,
            Arc::new(GenreRegistry::default_catalog()),
            Arc::new(GenreInfluenceTable::new()),
            config,
        )
    }

    #[tokio::test]
    async fn test_analyze_produces_complete_result() {
        let mut margins = vec![0.0; EmotionLabel::COUNT];
        margins[EmotionLabel::Joy.index()] = 3.0;
        let analyzer = analyzer_with(0.9, margins, PipelineConfig::default());

        let result = analyzer.analyze("An absolute triumph of a film.", &[]).await;

        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert_eq!(result.emotions.len(), 5);
        assert_eq!(result.emotions[0].emotion, "Joy");
        assert_eq!(result.emotions[0].score, 1.0);
        for entry in &result.emotions {
            assert!(entry.score >= 0.35 && entry.score <= 1.0);
        }
        assert!(result
            .summary
            .starts_with("This review is detected as Positive, with dominant emotions: Joy,"));
        assert!(!result.summary.contains("Genre(s)"));
    }

    #[tokio::test]
    async fn test_genre_influence_promotes_fear_for_horror() {
        // Equal margins; only the horror influence row separates the
        // emotions, and fear carries its largest multiplier.
        let analyzer = analyzer_with(
            0.2,
            vec![0.0; EmotionLabel::COUNT],
            PipelineConfig::default(),
        );

        let result = analyzer
            .analyze("A slow burn through an abandoned asylum.", &["Horror".to_string()])
            .await;

        assert_eq!(result.sentiment, SentimentLabel::Negative);
        assert_eq!(result.genres, vec!["horror".to_string()]);
        assert_eq!(result.emotions[0].emotion, "Fear");
        assert!(result
            .summary
            .ends_with("Genre(s) horror automatically influence emotional interpretation."));
    }

    #[tokio::test]
    async fn test_keyword_boosts_promote_surprise() {
        let analyzer = analyzer_with(
            0.9,
            vec![0.0; EmotionLabel::COUNT],
            PipelineConfig::default(),
        );

        let result = analyzer
            .analyze("A shocking twist I never saw coming!", &[])
            .await;

        assert_eq!(result.emotions[0].emotion, "Surprise");
        assert_eq!(result.emotions[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_noop_classifiers_yield_degraded_but_complete_result() {
        let analyzer = ReviewAnalyzer::new(
            ClassifierSet::noop(),
            Arc::new(GenreRegistry::default_catalog()),
            Arc::new(GenreInfluenceTable::new()),
            PipelineConfig::default(),
        );

        assert!(!analyzer.is_available());
        let result = analyzer.analyze("It was a movie.", &[]).await;

        // Neutral fusion resolves to Positive; a flat distribution collapses
        // to the confidence floor and ranks in label order.
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert_eq!(result.emotions.len(), 5);
        assert_eq!(result.emotions[0].emotion, "Anger");
        assert_eq!(result.emotions[0].score, 0.35);
        assert!(result
            .summary
            .contains("dominant emotions: Anger, Anticipation"));
    }

    #[tokio::test]
    async fn test_unknown_genres_are_dropped_from_result() {
        let analyzer = analyzer_with(
            0.9,
            vec![0.0; EmotionLabel::COUNT],
            PipelineConfig::default(),
        );

        let result = analyzer
            .analyze(
                "Fine enough.",
                &["Horror".to_string(), "Cooking Show".to_string()],
            )
            .await;

        assert_eq!(result.genres, vec!["horror".to_string()]);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let analyzer = analyzer_with(
            0.9,
            vec![0.0; EmotionLabel::COUNT],
            PipelineConfig::default(),
        );

        let reviews = vec!["First one.".to_string(), "Second one.".to_string()];
        let results = analyzer.analyze_batch(&reviews, &[]).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].review, "First one.");
        assert_eq!(results[1].review, "Second one.");
    }

    #[tokio::test]
    async fn test_top_emotions_honors_configured_k() {
        let config = PipelineConfig {
            top_emotions: 3,
            ..Default::default()
        };
        let analyzer = analyzer_with(0.9, vec![0.0; EmotionLabel::COUNT], config);

        let result = analyzer.analyze("Fine enough.", &[]).await;

        assert_eq!(result.emotions.len(), 3);
    }

    #[test]
    fn test_summary_without_genres_has_no_genre_note() {
        let emotions = vec![
            EmotionScore {
                emotion: "Joy".to_string(),
                score: 1.0,
            },
            EmotionScore {
                emotion: "Optimism".to_string(),
                score: 0.8,
            },
        ];
        let summary = compose_summary(SentimentLabel::Positive, &emotions, &[]);
        assert_eq!(
            summary,
            "This review is detected as Positive, with dominant emotions: Joy, Optimism."
        );
    }

    #[test]
    fn test_summary_with_genres_appends_note() {
        let emotions = vec![EmotionScore {
            emotion: "Fear".to_string(),
            score: 1.0,
        }];
        let summary = compose_summary(
            SentimentLabel::Negative,
            &emotions,
            &["horror".to_string(), "thriller".to_string()],
        );
        assert_eq!(
            summary,
            "This review is detected as Negative, with dominant emotions: Fear. \
             Genre(s) horror, thriller automatically influence emotional interpretation."
        );
    }
}
