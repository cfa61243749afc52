//! History-wide aggregation: the chart and summary payloads served next to
//! per-review results.

use std::collections::BTreeMap;

use crate::models::{
    AggregateReport, EmotionPoint, EmotionScore, EmotionTrend, GenreEmotionRow, ReviewResult,
    SentimentLabel,
};
use crate::pipeline::GenreInfluenceTable;
use crate::utils::math::round3;

/// Everything derived from the stored history. Handlers pair this with
/// whichever result slice the endpoint returns.
#[derive(Debug, Clone, Default)]
pub struct HistoryReport {
    pub aggregate: Option<AggregateReport>,
    pub global_emotion_chart: Vec<EmotionScore>,
    pub genre_emotion_summary: Vec<GenreEmotionRow>,
    pub emotion_trend: Vec<EmotionTrend>,
}

/// Recompute all aggregates over the full history.
///
/// An empty history yields empty charts and no aggregate block. Emotions
/// that never appear in any retained top list are omitted rather than
/// reported as zero.
pub fn build_report(history: &[ReviewResult], influence: &GenreInfluenceTable) -> HistoryReport {
    if history.is_empty() {
        return HistoryReport::default();
    }
    HistoryReport {
        aggregate: Some(AggregateReport {
            dominant_sentiment: dominant_sentiment(history),
            review_count: history.len(),
        }),
        global_emotion_chart: global_chart(history),
        genre_emotion_summary: genre_summary(history, influence),
        emotion_trend: trend(history),
    }
}

/// Majority sentiment across the history; an exact tie reads as Positive.
fn dominant_sentiment(history: &[ReviewResult]) -> SentimentLabel {
    let positive = history
        .iter()
        .filter(|r| r.sentiment == SentimentLabel::Positive)
        .count();
    if positive * 2 >= history.len() {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Negative
    }
}

/// Per-emotion score totals averaged over the number of reviews, not the
/// number of appearances, so rarely-surfaced emotions stay small.
fn global_chart(history: &[ReviewResult]) -> Vec<EmotionScore> {
    let mut totals: BTreeMap<&str, f32> = BTreeMap::new();
    for result in history {
        for entry in &result.emotions {
            *totals.entry(entry.emotion.as_str()).or_insert(0.0) += entry.score;
        }
    }
    let count = history.len() as f32;
    totals
        .into_iter()
        .map(|(emotion, total)| EmotionScore {
            emotion: emotion.to_string(),
            score: round3(total / count),
        })
        .collect()
}

/// Average per-(genre, emotion) contribution, where each review splits its
/// weight evenly across its genres and each contribution is scaled by the
/// raw influence multiplier for that pairing.
fn genre_summary(history: &[ReviewResult], influence: &GenreInfluenceTable) -> Vec<GenreEmotionRow> {
    let mut contributions: BTreeMap<&str, BTreeMap<String, Vec<f32>>> = BTreeMap::new();
    for result in history {
        if result.genres.is_empty() {
            continue;
        }
        let weight = 1.0 / result.genres.len() as f32;
        for genre in &result.genres {
            let per_genre = contributions.entry(genre.as_str()).or_default();
            for entry in &result.emotions {
                let multiplier = crate::labels::EmotionLabel::from_key(
                    &entry.emotion.to_lowercase(),
                )
                .map(|label| influence.multiplier(genre, label))
                .unwrap_or(1.0);
                per_genre
                    .entry(entry.emotion.clone())
                    .or_default()
                    .push(entry.score * weight * multiplier);
            }
        }
    }
    contributions
        .into_iter()
        .map(|(genre, per_emotion)| GenreEmotionRow {
            genre: genre.to_string(),
            averages: per_emotion
                .into_iter()
                .map(|(emotion, values)| {
                    let mean = values.iter().sum::<f32>() / values.len() as f32;
                    (emotion, round3(mean))
                })
                .collect(),
        })
        .collect()
}

/// One series per emotion with 1-based x positions, covering only the
/// reviews where that emotion made the retained top list.
fn trend(history: &[ReviewResult]) -> Vec<EmotionTrend> {
    let mut series: BTreeMap<String, Vec<EmotionPoint>> = BTreeMap::new();
    for (position, result) in history.iter().enumerate() {
        for entry in &result.emotions {
            series.entry(entry.emotion.clone()).or_default().push(EmotionPoint {
                x: position + 1,
                y: entry.score,
            });
        }
    }
    series
        .into_iter()
        .map(|(emotion, points)| EmotionTrend { emotion, points })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        sentiment: SentimentLabel,
        genres: &[&str],
        emotions: &[(&str, f32)],
    ) -> ReviewResult {
        ReviewResult {
            review: "r".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            sentiment,
            emotions: emotions
                .iter()
                .map(|(emotion, score)| EmotionScore {
                    emotion: emotion.to_string(),
                    score: *score,
                })
                .collect(),
            summary: String::new(),
        }
    }

    #[test]
    fn test_empty_history_is_all_empty() {
        let report = build_report(&[], &GenreInfluenceTable::new());
        assert!(report.aggregate.is_none());
        assert!(report.global_emotion_chart.is_empty());
        assert!(report.genre_emotion_summary.is_empty());
        assert!(report.emotion_trend.is_empty());
    }

    #[test]
    fn test_global_chart_averages_over_review_count() {
        let history = vec![
            result(SentimentLabel::Positive, &[], &[("Joy", 1.0)]),
            result(SentimentLabel::Positive, &[], &[("Joy", 0.5), ("Fear", 0.8)]),
        ];
        let report = build_report(&history, &GenreInfluenceTable::new());
        // BTreeMap keys, so Fear sorts before Joy.
        assert_eq!(report.global_emotion_chart.len(), 2);
        assert_eq!(report.global_emotion_chart[0].emotion, "Fear");
        assert_eq!(report.global_emotion_chart[0].score, 0.4);
        assert_eq!(report.global_emotion_chart[1].emotion, "Joy");
        assert_eq!(report.global_emotion_chart[1].score, 0.75);
    }

    #[test]
    fn test_genre_summary_splits_weight_and_applies_multiplier() {
        // Two genres halve the weight; horror multiplies Fear by 2.6.
        let history = vec![result(
            SentimentLabel::Negative,
            &["horror", "western"],
            &[("Fear", 1.0)],
        )];
        let report = build_report(&history, &GenreInfluenceTable::new());
        assert_eq!(report.genre_emotion_summary.len(), 2);
        assert_eq!(report.genre_emotion_summary[0].genre, "horror");
        assert_eq!(report.genre_emotion_summary[0].averages["Fear"], 1.3);
        assert_eq!(report.genre_emotion_summary[1].genre, "western");
        // Western has no fear multiplier, so only the weight applies.
        assert_eq!(report.genre_emotion_summary[1].averages["Fear"], 0.5);
    }

    #[test]
    fn test_genre_summary_skips_genre_free_reviews() {
        let history = vec![result(SentimentLabel::Positive, &[], &[("Joy", 1.0)])];
        let report = build_report(&history, &GenreInfluenceTable::new());
        assert!(report.genre_emotion_summary.is_empty());
        assert_eq!(report.global_emotion_chart.len(), 1);
    }

    #[test]
    fn test_trend_uses_one_based_positions() {
        let history = vec![
            result(SentimentLabel::Positive, &[], &[("Joy", 0.9)]),
            result(SentimentLabel::Positive, &[], &[("Fear", 0.6)]),
            result(SentimentLabel::Positive, &[], &[("Joy", 0.7)]),
        ];
        let report = build_report(&history, &GenreInfluenceTable::new());
        let joy = report
            .emotion_trend
            .iter()
            .find(|t| t.emotion == "Joy")
            .unwrap();
        assert_eq!(joy.points.len(), 2);
        assert_eq!(joy.points[0].x, 1);
        assert_eq!(joy.points[1].x, 3);
        assert_eq!(joy.points[1].y, 0.7);
        let fear = report
            .emotion_trend
            .iter()
            .find(|t| t.emotion == "Fear")
            .unwrap();
        assert_eq!(fear.points, vec![EmotionPoint { x: 2, y: 0.6 }]);
    }

    #[test]
    fn test_dominant_sentiment_majority_and_tie() {
        let positive = result(SentimentLabel::Positive, &[], &[("Joy", 1.0)]);
        let negative = result(SentimentLabel::Negative, &[], &[("Sadness", 1.0)]);

        let history = vec![negative.clone(), negative.clone(), positive.clone()];
        let report = build_report(&history, &GenreInfluenceTable::new());
        assert_eq!(
            report.aggregate.unwrap().dominant_sentiment,
            SentimentLabel::Negative
        );

        let tied = vec![negative, positive];
        let report = build_report(&tied, &GenreInfluenceTable::new());
        let aggregate = report.aggregate.unwrap();
        assert_eq!(aggregate.dominant_sentiment, SentimentLabel::Positive);
        assert_eq!(aggregate.review_count, 2);
    }

    #[test]
    fn test_scores_are_rounded_to_three_decimals() {
        let history = vec![
            result(SentimentLabel::Positive, &[], &[("Joy", 0.333)]),
            result(SentimentLabel::Positive, &[], &[("Joy", 0.334)]),
            result(SentimentLabel::Positive, &[], &[("Joy", 0.335)]),
        ];
        let report = build_report(&history, &GenreInfluenceTable::new());
        assert_eq!(report.global_emotion_chart[0].score, 0.334);
    }
}
