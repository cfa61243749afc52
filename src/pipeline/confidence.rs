//! Confidence normalization and top-emotion ranking.
//!
//! The boosted score vector has no meaningful scale of its own, so it is
//! min-max normalized and remapped into a bounded confidence band. The floor
//! keeps the weakest emotion a valid signal rather than an absent one.

use std::cmp::Ordering;

use crate::labels::EmotionLabel;
use crate::models::EmotionScore;
use crate::utils::math::{min_max_normalize, remap_unit, round3};

/// Remap boosted scores into [floor, 1.0], rounded to three decimals.
///
/// An all-equal input min-max normalizes to all zeros and therefore lands on
/// the floor for every emotion.
pub fn normalize_confidence(scores: &[f32], floor: f32) -> Vec<f32> {
    remap_unit(&min_max_normalize(scores), floor, 1.0)
        .into_iter()
        .map(round3)
        .collect()
}

/// Rank emotions by confidence descending and keep the top `k`.
///
/// The sort is stable, so equal confidences keep [`EmotionLabel`] order.
/// Confidences are in label order; `k` larger than the label count keeps
/// everything.
pub fn rank_top_emotions(confidences: &[f32], k: usize) -> Vec<EmotionScore> {
    let mut ranked: Vec<(EmotionLabel, f32)> = EmotionLabel::ALL
        .iter()
        .copied()
        .zip(confidences.iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
        .into_iter()
        .map(|(label, score)| EmotionScore {
            emotion: label.display_name().to_string(),
            score,
        })
        .collect()
}
