//! Lexical keyword triggers and surprise-emphasis heuristics.
//!
//! Runs after genre influence, on the raw (not yet normalized) score vector.
//! Keyword matching is plain substring containment over the normalized
//! review text, so word fragments match too ("eager" fires inside
//! "eagerly"); accepted limitation, kept for parity with the trained
//! pipeline.

use crate::labels::EmotionLabel;
use crate::labels::EmotionLabel as E;
use crate::utils::math::mean;

/// Keyword → emotion triggers. Keywords are normalized-text form (lowercase
/// letters and spaces only).
const KEYWORD_TRIGGERS: &[(&str, EmotionLabel)] = &[
    ("shocking", E::Surprise),
    ("unexpected", E::Surprise),
    ("twist", E::Surprise),
    ("jaw dropping", E::Surprise),
    ("love", E::Optimism),
    ("hopeful", E::Optimism),
    ("uplifting", E::Optimism),
    ("inspiring", E::Optimism),
    ("hilarious", E::Joy),
    ("delightful", E::Joy),
    ("charming", E::Joy),
    ("terrifying", E::Fear),
    ("creepy", E::Fear),
    ("scary", E::Fear),
    ("heartbreaking", E::Sadness),
    ("tragic", E::Sadness),
    ("tearjerker", E::Sadness),
    ("disgusting", E::Disgust),
    ("gross", E::Disgust),
    ("repulsive", E::Disgust),
    ("furious", E::Anger),
    ("infuriating", E::Anger),
    ("outrage", E::Anger),
    ("suspense", E::Anticipation),
    ("cliffhanger", E::Anticipation),
    ("eager", E::Anticipation),
];

/// Genres whose audiences reward surprise.
const SURPRISE_PRONE_GENRES: &[&str] = &[
    "comedy",
    "action",
    "thriller",
    "fantasy",
    "horror",
    "adventure",
    "science fiction",
    "mystery",
];

/// Multiply each triggered emotion's score by `boost`, once per matched
/// keyword. Returns the number of matches.
pub fn apply_keyword_boosts(scores: &mut [f32], normalized_text: &str, boost: f32) -> usize {
    let mut matches = 0;
    for (keyword, label) in KEYWORD_TRIGGERS {
        if normalized_text.contains(keyword) {
            scores[label.index()] *= boost;
            matches += 1;
        }
    }
    matches
}

/// One extra multiplicative surprise boost when any resolved tag belongs to
/// the surprise-prone set. Returns whether the boost fired.
pub fn apply_surprise_genre_boost(scores: &mut [f32], genres: &[String], boost: f32) -> bool {
    let prone = genres
        .iter()
        .any(|genre| SURPRISE_PRONE_GENRES.contains(&genre.as_str()));
    if prone {
        scores[E::Surprise.index()] *= boost;
    }
    prone
}

/// Anti-starvation floor for surprise.
///
/// With m the mean over all emotion scores and r the floor ratio, a surprise
/// score below r·m is replaced by ((1-r)·surprise + r·m) / damping. At the
/// threshold the replacement equals the original score, and for the default
/// (r = 0.8, damping = 1.2) the corrected value never exceeds m. Returns
/// whether the correction fired.
pub fn apply_surprise_floor(scores: &mut [f32], floor_ratio: f32, damping: f32) -> bool {
    let m = mean(scores);
    let surprise = scores[E::Surprise.index()];
    if surprise < floor_ratio * m {
        scores[E::Surprise.index()] = ((1.0 - floor_ratio) * surprise + floor_ratio * m) / damping;
        true
    } else {
        false
    }
}
