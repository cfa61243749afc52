//! Configuration: path resolution and pipeline tuning.
//!
//! Pipeline tuning loads from `{data_path}/sentira.toml` (or the
//! `SENTIRA_PIPELINE` env var as JSON) with warn-and-default on any parse
//! failure, so a broken config file never stops the service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Directory name used both for `./.sentira` and `~/.sentira`.
const DATA_DIR_NAME: &str = ".sentira";
const CONFIG_FILE_NAME: &str = "sentira.toml";

/// Tuning knobs for the fusion pipeline. Every field has a fitted default;
/// the config file only needs the ones being changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Softmax temperature over ensemble margins (useful range ~1.2-1.3).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Genre influence mixing weight in [0, 1]; 1.0 is pure multiplicative
    /// scaling.
    #[serde(default = "default_genre_mix_weight")]
    pub genre_mix_weight: f32,
    /// Per-keyword score multiplier.
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,
    /// Extra surprise multiplier for surprise-prone genres.
    #[serde(default = "default_surprise_genre_boost")]
    pub surprise_genre_boost: f32,
    /// Surprise floor threshold as a fraction of the mean score.
    #[serde(default = "default_surprise_floor_ratio")]
    pub surprise_floor_ratio: f32,
    /// Damping divisor applied by the surprise floor correction.
    #[serde(default = "default_surprise_damping")]
    pub surprise_damping: f32,
    /// Lower bound of the confidence band.
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f32,
    /// How many top emotions each result keeps.
    #[serde(default = "default_top_emotions")]
    pub top_emotions: usize,
}

fn default_temperature() -> f32 {
    1.2
}

fn default_genre_mix_weight() -> f32 {
    1.0
}

fn default_keyword_boost() -> f32 {
    1.35
}

fn default_surprise_genre_boost() -> f32 {
    1.25
}

fn default_surprise_floor_ratio() -> f32 {
    0.8
}

fn default_surprise_damping() -> f32 {
    1.2
}

fn default_confidence_floor() -> f32 {
    0.35
}

fn default_top_emotions() -> usize {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            genre_mix_weight: default_genre_mix_weight(),
            keyword_boost: default_keyword_boost(),
            surprise_genre_boost: default_surprise_genre_boost(),
            surprise_floor_ratio: default_surprise_floor_ratio(),
            surprise_damping: default_surprise_damping(),
            confidence_floor: default_confidence_floor(),
            top_emotions: default_top_emotions(),
        }
    }
}

impl PipelineConfig {
    /// Replace out-of-range values with their defaults, warning once per
    /// field. Keeps a bad config file from producing NaN distributions.
    fn sanitized(mut self) -> Self {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            warn!(
                "Pipeline temperature {} is not positive. Using default {}.",
                self.temperature,
                default_temperature()
            );
            self.temperature = default_temperature();
        }
        if !(0.0..=1.0).contains(&self.genre_mix_weight) {
            warn!(
                "Genre mix weight {} is outside [0, 1]. Using default {}.",
                self.genre_mix_weight,
                default_genre_mix_weight()
            );
            self.genre_mix_weight = default_genre_mix_weight();
        }
        if !(0.0..1.0).contains(&self.confidence_floor) {
            warn!(
                "Confidence floor {} is outside [0, 1). Using default {}.",
                self.confidence_floor,
                default_confidence_floor()
            );
            self.confidence_floor = default_confidence_floor();
        }
        if self.top_emotions == 0 {
            warn!("top_emotions must be at least 1. Using default {}.", default_top_emotions());
            self.top_emotions = default_top_emotions();
        }
        self
    }
}

/// The `sentira.toml` layout: pipeline tuning under a `[pipeline]` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pipeline: Option<PipelineConfig>,
}

/// Load pipeline config with priority:
/// 1. `{data_path}/sentira.toml` file
/// 2. `SENTIRA_PIPELINE` env var (JSON)
/// 3. Defaults
pub fn load_pipeline_config(data_path: &Path) -> PipelineConfig {
    let config_path = data_path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(config) => {
                    info!("Loaded pipeline config from {}", config_path.display());
                    return config.pipeline.unwrap_or_default().sanitized();
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
            }
        }
    }

    if let Ok(json) = std::env::var("SENTIRA_PIPELINE") {
        match serde_json::from_str::<PipelineConfig>(&json) {
            Ok(config) => {
                info!("Loaded pipeline config from SENTIRA_PIPELINE env");
                return config.sanitized();
            }
            Err(e) => {
                warn!("Failed to parse SENTIRA_PIPELINE: {}. Using defaults.", e);
            }
        }
    }

    PipelineConfig::default()
}

/// Resolve the data directory.
///
/// Priority: explicit path > SENTIRA_DATA_PATH env > ./.sentira (if exists)
/// > ~/.sentira. Falls back to `./.sentira` when no home directory is
/// resolvable.
pub fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var("SENTIRA_DATA_PATH").ok().map(PathBuf::from))
        .or_else(|| {
            let local = Path::new(DATA_DIR_NAME);
            if local.is_dir() {
                Some(local.to_path_buf())
            } else {
                None
            }
        })
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(DATA_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
        })
}

/// Resolve the models directory: explicit path > SENTIRA_MODELS_PATH env >
/// `{data_path}/models`.
pub fn resolve_models_path(explicit: Option<PathBuf>, data_path: &Path) -> PathBuf {
    explicit
        .or_else(|| std::env::var("SENTIRA_MODELS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| data_path.join("models"))
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub models_path: PathBuf,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Resolve paths and load pipeline tuning.
    pub fn resolve(data_flag: Option<PathBuf>, models_flag: Option<PathBuf>) -> Self {
        let data_path = resolve_data_path(data_flag);
        let models_path = resolve_models_path(models_flag, &data_path);
        let pipeline = load_pipeline_config(&data_path);
        Self {
            data_path,
            models_path,
            pipeline,
        }
    }
}
