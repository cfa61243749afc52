//! Fixed label registries: the emotion set and the known-genre catalog.
//!
//! Emotion labels are a closed enum with a canonical order that doubles as
//! the margin/distribution vector layout. Genre tags are open strings matched
//! case-insensitively against a registry resolved once at startup.

use std::collections::HashMap;

/// The fixed emotion set, in canonical order.
///
/// The order here is load-bearing: every margin vector, distribution, and
/// influence row is laid out in this order, and ties in ranked output break
/// toward the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionLabel {
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Optimism,
    Sadness,
    Surprise,
}

impl EmotionLabel {
    pub const COUNT: usize = 8;

    pub const ALL: [EmotionLabel; Self::COUNT] = [
        EmotionLabel::Anger,
        EmotionLabel::Anticipation,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Joy,
        EmotionLabel::Optimism,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
    ];

    /// Lowercase key used by model artifacts.
    pub fn key(&self) -> &'static str {
        match self {
            EmotionLabel::Anger => "anger",
            EmotionLabel::Anticipation => "anticipation",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Joy => "joy",
            EmotionLabel::Optimism => "optimism",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Surprise => "surprise",
        }
    }

    /// Canonical display name used in wire output.
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionLabel::Anger => "Anger",
            EmotionLabel::Anticipation => "Anticipation",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Fear => "Fear",
            EmotionLabel::Joy => "Joy",
            EmotionLabel::Optimism => "Optimism",
            EmotionLabel::Sadness => "Sadness",
            EmotionLabel::Surprise => "Surprise",
        }
    }

    /// Position in the canonical vector layout.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolve a lowercase artifact key back to a label.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|label| label.key() == key)
    }
}

/// The genre tags sentira knows about, resolved once at startup.
///
/// Registry order defines the multi-hot encoding layout handed to the
/// emotion model, so when a model bundle is loaded the registry comes from
/// its artifacts. The built-in catalog backs degraded mode.
#[derive(Debug, Clone)]
pub struct GenreRegistry {
    tags: Vec<String>,
    index: HashMap<String, usize>,
}

/// Genres known to the built-in catalog, used when no model bundle provides
/// its own class list.
const DEFAULT_CATALOG: &[&str] = &[
    "action",
    "adventure",
    "animation",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "family",
    "fantasy",
    "foreign",
    "history",
    "horror",
    "music",
    "mystery",
    "romance",
    "science fiction",
    "thriller",
    "tv movie",
    "war",
    "western",
];

impl GenreRegistry {
    /// Build a registry from an ordered tag list.
    ///
    /// Tags are lowercased; duplicates keep their first position.
    pub fn new(tags: Vec<String>) -> Self {
        let mut ordered = Vec::with_capacity(tags.len());
        let mut index = HashMap::with_capacity(tags.len());
        for tag in tags {
            let canonical = tag.trim().to_lowercase();
            if canonical.is_empty() || index.contains_key(&canonical) {
                continue;
            }
            index.insert(canonical.clone(), ordered.len());
            ordered.push(canonical);
        }
        Self {
            tags: ordered,
            index,
        }
    }

    /// The built-in genre catalog.
    pub fn default_catalog() -> Self {
        Self::new(DEFAULT_CATALOG.iter().map(|s| s.to_string()).collect())
    }

    /// Resolve raw user-supplied tags against the registry.
    ///
    /// Matching is case-insensitive; unknown tags are dropped silently and
    /// duplicates collapse to their first occurrence. Never fails.
    pub fn resolve(&self, raw: &[String]) -> Vec<String> {
        let mut resolved = Vec::new();
        for tag in raw {
            let canonical = tag.trim().to_lowercase();
            if canonical.is_empty() || resolved.contains(&canonical) {
                continue;
            }
            if self.index.contains_key(&canonical) {
                resolved.push(canonical);
            }
        }
        resolved
    }

    /// Multi-hot encoding of resolved tags in registry order.
    pub fn multi_hot(&self, resolved: &[String]) -> Vec<f32> {
        let mut encoding = vec![0.0; self.tags.len()];
        for tag in resolved {
            if let Some(&i) = self.index.get(tag) {
                encoding[i] = 1.0;
            }
        }
        encoding
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
