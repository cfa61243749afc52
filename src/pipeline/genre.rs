//! Genre-to-emotion influence priors.
//!
//! Each listed genre carries empirically chosen multipliers for the emotions
//! its audiences lean into; unspecified (genre, emotion) pairs default to
//! 1.0. The table covers more tags than the default genre catalog, so a
//! model bundle with a richer class list picks up its rows for free;
//! lookups for unlisted tags fall back to the all-ones row.

use std::collections::HashMap;

use crate::labels::EmotionLabel;
use crate::labels::EmotionLabel as E;

/// Static multiplier rows, values in [1.0, 2.6].
const INFLUENCE_ROWS: &[(&str, &[(EmotionLabel, f32)])] = &[
    ("horror", &[(E::Fear, 2.6), (E::Anticipation, 1.8), (E::Surprise, 1.9)]),
    ("thriller", &[(E::Anticipation, 2.4), (E::Fear, 2.0), (E::Surprise, 1.6)]),
    ("drama", &[(E::Sadness, 1.8), (E::Anticipation, 1.2), (E::Joy, 1.0)]),
    ("romance", &[(E::Joy, 2.0), (E::Optimism, 1.7), (E::Sadness, 1.3)]),
    ("comedy", &[(E::Joy, 2.3), (E::Optimism, 1.7), (E::Surprise, 1.4)]),
    (
        "action",
        &[(E::Anger, 1.5), (E::Anticipation, 2.0), (E::Fear, 1.4), (E::Surprise, 1.3)],
    ),
    (
        "adventure",
        &[(E::Anticipation, 2.2), (E::Joy, 1.8), (E::Optimism, 1.3), (E::Surprise, 1.4)],
    ),
    (
        "fantasy",
        &[(E::Anticipation, 2.0), (E::Joy, 1.8), (E::Optimism, 1.5), (E::Surprise, 1.3)],
    ),
    (
        "science fiction",
        &[(E::Anticipation, 1.7), (E::Surprise, 1.4), (E::Fear, 1.2)],
    ),
    ("crime", &[(E::Fear, 1.4), (E::Anger, 1.4), (E::Anticipation, 1.2)]),
    ("mystery", &[(E::Anticipation, 1.7), (E::Fear, 1.4), (E::Surprise, 1.3)]),
    ("psychological", &[(E::Fear, 1.6), (E::Sadness, 1.3), (E::Anticipation, 1.2)]),
    ("slice of life", &[(E::Joy, 1.4), (E::Optimism, 1.2), (E::Sadness, 1.1)]),
    ("shoujo", &[(E::Joy, 1.5), (E::Optimism, 1.3)]),
    ("shounen", &[(E::Anticipation, 1.6), (E::Joy, 1.3), (E::Optimism, 1.2)]),
    ("seinen", &[(E::Sadness, 1.4), (E::Anger, 1.2)]),
    ("super power", &[(E::Anticipation, 1.5), (E::Joy, 1.3)]),
    ("samurai", &[(E::Anticipation, 1.4), (E::Anger, 1.2), (E::Fear, 1.1)]),
    ("martial arts", &[(E::Anticipation, 1.6), (E::Anger, 1.3)]),
    ("military", &[(E::Fear, 1.4), (E::Sadness, 1.3), (E::Anticipation, 1.2)]),
    ("war", &[(E::Sadness, 1.6), (E::Anger, 1.3), (E::Fear, 1.3)]),
    ("magic", &[(E::Anticipation, 1.6), (E::Joy, 1.5), (E::Surprise, 1.3)]),
    ("supernatural", &[(E::Fear, 1.5), (E::Anticipation, 1.3), (E::Surprise, 1.3)]),
    ("demons", &[(E::Fear, 1.6), (E::Anticipation, 1.3)]),
    ("vampire", &[(E::Fear, 1.6), (E::Sadness, 1.2)]),
    ("mecha", &[(E::Anticipation, 1.4), (E::Fear, 1.2), (E::Optimism, 1.1)]),
    ("space", &[(E::Anticipation, 1.4), (E::Surprise, 1.3)]),
    ("history", &[(E::Sadness, 1.4), (E::Fear, 1.1)]),
    ("biography", &[(E::Sadness, 1.4), (E::Optimism, 1.2)]),
    ("foreign", &[(E::Sadness, 1.3), (E::Joy, 1.1)]),
    ("documentary", &[(E::Sadness, 1.3), (E::Fear, 1.1)]),
    ("animation", &[(E::Joy, 1.4), (E::Optimism, 1.3)]),
    ("music", &[(E::Joy, 1.5), (E::Optimism, 1.4)]),
    ("school", &[(E::Joy, 1.3), (E::Anticipation, 1.3)]),
    ("parody", &[(E::Joy, 1.3), (E::Surprise, 1.3)]),
    ("family", &[(E::Joy, 1.5), (E::Optimism, 1.3), (E::Sadness, 1.1)]),
    ("sports", &[(E::Anticipation, 1.8), (E::Joy, 1.4), (E::Optimism, 1.3)]),
    ("game", &[(E::Anticipation, 1.5), (E::Joy, 1.3), (E::Surprise, 1.2)]),
    ("western", &[(E::Anger, 1.3), (E::Sadness, 1.2)]),
];

/// Genre → per-emotion multiplier rows, built once at startup and shared by
/// reference.
#[derive(Debug, Clone)]
pub struct GenreInfluenceTable {
    rows: HashMap<&'static str, [f32; EmotionLabel::COUNT]>,
}

impl GenreInfluenceTable {
    pub fn new() -> Self {
        let mut rows = HashMap::with_capacity(INFLUENCE_ROWS.len());
        for (genre, pairs) in INFLUENCE_ROWS {
            let mut row = [1.0_f32; EmotionLabel::COUNT];
            for (label, value) in *pairs {
                row[label.index()] = *value;
            }
            rows.insert(*genre, row);
        }
        Self { rows }
    }

    /// Raw multiplier for one (genre, emotion) pair; 1.0 when unlisted.
    pub fn multiplier(&self, genre: &str, label: EmotionLabel) -> f32 {
        self.rows
            .get(genre)
            .map(|row| row[label.index()])
            .unwrap_or(1.0)
    }

    /// Full multiplier row for one genre; all-ones when unlisted.
    pub fn row(&self, genre: &str) -> [f32; EmotionLabel::COUNT] {
        self.rows
            .get(genre)
            .copied()
            .unwrap_or([1.0; EmotionLabel::COUNT])
    }

    /// Normalized influence vector for a resolved tag set.
    ///
    /// The component-wise mean across the tags' rows (averaged rather than
    /// applied per tag, so stacked tags do not double-count), divided by its
    /// own maximum so the strongest component is exactly 1.0. An empty tag
    /// set has no influence and yields None.
    pub fn influence_vector(&self, genres: &[String]) -> Option<[f32; EmotionLabel::COUNT]> {
        if genres.is_empty() {
            return None;
        }
        let mut acc = [0.0_f32; EmotionLabel::COUNT];
        for genre in genres {
            let row = self.row(genre);
            for (slot, value) in acc.iter_mut().zip(row.iter()) {
                *slot += value;
            }
        }
        let count = genres.len() as f32;
        for value in &mut acc {
            *value /= count;
        }
        // Rows are >= 1.0 everywhere, so the maximum is always positive.
        let max = acc.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        for value in &mut acc {
            *value /= max;
        }
        Some(acc)
    }
}

impl Default for GenreInfluenceTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Blend a distribution with its influence-scaled counterpart.
///
/// `fused[e] = (1 - w)·p[e] + w·p[e]·influence[e]`. A mix weight of 1.0 is
/// pure multiplicative scaling; 0.0 leaves the distribution untouched.
pub fn apply_influence(
    distribution: &[f32],
    influence: &[f32; EmotionLabel::COUNT],
    mix_weight: f32,
) -> Vec<f32> {
    let w = mix_weight.clamp(0.0, 1.0);
    distribution
        .iter()
        .zip(influence.iter())
        .map(|(p, i)| (1.0 - w) * p + w * p * i)
        .collect()
}
