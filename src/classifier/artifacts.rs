//! Model bundle loading from a directory of JSON artifacts.
//!
//! Every fitted estimator ships as a small JSON file exported at training
//! time. The bundle either loads completely or not at all: a missing or
//! malformed artifact fails the whole load, and the caller wires noop
//! classifiers instead (the optional scaler is the one exception, absent is
//! fine).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::classifier::linear::{LinearTextModel, MaxAbsScaler, OvrEnsemble, TfidfVectorizer};
use crate::error::SentiraError;
use crate::labels::EmotionLabel;

const SENTIMENT_LOGISTIC_FILE: &str = "sentiment_logistic.json";
const SENTIMENT_MARGIN_FILE: &str = "sentiment_margin.json";
const EMOTION_TFIDF_FILE: &str = "emotion_tfidf.json";
const EMOTION_ENSEMBLE_FILE: &str = "emotion_ensemble.json";
const GENRE_CLASSES_FILE: &str = "genre_classes.json";
const SCALER_FILE: &str = "scaler.json";

#[derive(Debug, Deserialize)]
struct TfidfArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// A self-contained sentiment pipeline: its own vectorizer plus one weight
/// row.
#[derive(Debug, Deserialize)]
struct SentimentArtifact {
    vectorizer: TfidfArtifact,
    coef: Vec<f32>,
    intercept: f32,
}

/// One-vs-rest emotion ensemble over the combined text+genre vector.
/// `classes` carries the label order the rows were trained in.
#[derive(Debug, Deserialize)]
struct EnsembleArtifact {
    classes: Vec<String>,
    coefs: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ClassListArtifact {
    classes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    scale: Vec<f32>,
}

/// All fitted models needed for prediction, loaded from one directory.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub sentiment_logistic: LinearTextModel,
    pub sentiment_margin: LinearTextModel,
    pub emotion_tfidf: TfidfVectorizer,
    /// Rows permuted into [`EmotionLabel`] order at load time.
    pub emotion_ensemble: OvrEnsemble,
    /// Genre tags in the multi-hot encoding order the ensemble was trained
    /// with.
    pub genre_classes: Vec<String>,
    pub scaler: Option<MaxAbsScaler>,
}

fn read_artifact<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, SentiraError> {
    let path = dir.join(name);
    let raw = fs::read_to_string(&path)
        .map_err(|e| SentiraError::Model(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| SentiraError::Model(format!("Failed to parse {}: {}", path.display(), e)))
}

fn build_sentiment_model(artifact: SentimentArtifact) -> Result<LinearTextModel, SentiraError> {
    let vectorizer = TfidfVectorizer::new(artifact.vectorizer.vocabulary, artifact.vectorizer.idf)?;
    LinearTextModel::new(vectorizer, artifact.coef, artifact.intercept)
}

/// Permute ensemble rows from artifact class order into label order, so
/// downstream margin vectors line up with [`EmotionLabel::ALL`].
fn reorder_by_label(artifact: EnsembleArtifact) -> Result<OvrEnsemble, SentiraError> {
    if artifact.classes.len() != EmotionLabel::COUNT
        || artifact.coefs.len() != artifact.classes.len()
        || artifact.intercepts.len() != artifact.classes.len()
    {
        return Err(SentiraError::Model(format!(
            "Ensemble artifact expects {} aligned classes/rows/intercepts, got {}/{}/{}",
            EmotionLabel::COUNT,
            artifact.classes.len(),
            artifact.coefs.len(),
            artifact.intercepts.len()
        )));
    }

    let mut coefs = Vec::with_capacity(EmotionLabel::COUNT);
    let mut intercepts = Vec::with_capacity(EmotionLabel::COUNT);
    for label in EmotionLabel::ALL {
        let position = artifact
            .classes
            .iter()
            .position(|class| class == label.key())
            .ok_or_else(|| {
                SentiraError::Model(format!(
                    "Ensemble artifact is missing emotion class '{}'",
                    label.key()
                ))
            })?;
        coefs.push(artifact.coefs[position].clone());
        intercepts.push(artifact.intercepts[position]);
    }
    OvrEnsemble::new(coefs, intercepts)
}

impl ModelBundle {
    /// Load all artifacts from a models directory.
    ///
    /// Validates that artifact widths agree: the ensemble must accept
    /// exactly text-width + genre-count features, and so must the scaler
    /// when present.
    pub fn load(dir: &Path) -> Result<Self, SentiraError> {
        let sentiment_logistic =
            build_sentiment_model(read_artifact(dir, SENTIMENT_LOGISTIC_FILE)?)?;
        let sentiment_margin = build_sentiment_model(read_artifact(dir, SENTIMENT_MARGIN_FILE)?)?;

        let tfidf_artifact: TfidfArtifact = read_artifact(dir, EMOTION_TFIDF_FILE)?;
        let emotion_tfidf = TfidfVectorizer::new(tfidf_artifact.vocabulary, tfidf_artifact.idf)?;

        let genre_artifact: ClassListArtifact = read_artifact(dir, GENRE_CLASSES_FILE)?;
        let emotion_ensemble = reorder_by_label(read_artifact(dir, EMOTION_ENSEMBLE_FILE)?)?;

        let combined_width = emotion_tfidf.width() + genre_artifact.classes.len();
        if emotion_ensemble.width() != combined_width {
            return Err(SentiraError::Model(format!(
                "Ensemble width {} does not match text+genre width {}",
                emotion_ensemble.width(),
                combined_width
            )));
        }

        let scaler = if dir.join(SCALER_FILE).exists() {
            let artifact: ScalerArtifact = read_artifact(dir, SCALER_FILE)?;
            let scaler = MaxAbsScaler::new(artifact.scale);
            if scaler.width() != combined_width {
                return Err(SentiraError::Model(format!(
                    "Scaler width {} does not match text+genre width {}",
                    scaler.width(),
                    combined_width
                )));
            }
            Some(scaler)
        } else {
            None
        };

        Ok(Self {
            sentiment_logistic,
            sentiment_margin,
            emotion_tfidf,
            emotion_ensemble,
            genre_classes: genre_artifact.classes,
            scaler,
        })
    }
}
