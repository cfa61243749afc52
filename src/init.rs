//! Shared initialization logic for the HTTP server and CLI modes.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::classifier::{ClassifierSet, ModelBundle};
use crate::config::AppConfig;
use crate::labels::GenreRegistry;
use crate::pipeline::{GenreInfluenceTable, ReviewAnalyzer};
use crate::store::HistoryStore;

/// Application context holding the analyzer and the history store.
///
/// Shared between the HTTP server and CLI commands.
pub struct AppContext {
    pub config: AppConfig,
    pub analyzer: Arc<ReviewAnalyzer>,
    pub store: Arc<HistoryStore>,
    pub influence: Arc<GenreInfluenceTable>,
    pub registry: Arc<GenreRegistry>,
}

impl AppContext {
    /// Initialize application context.
    ///
    /// A missing or broken model bundle never fails startup: the analyzer
    /// runs with noop classifiers and the built-in genre catalog, producing
    /// neutral results until fitted artifacts appear.
    pub async fn new(data_path: Option<PathBuf>, models_path: Option<PathBuf>) -> Result<Self> {
        let config = AppConfig::resolve(data_path, models_path);
        tracing::info!("Using data path: {}", config.data_path.display());

        std::fs::create_dir_all(&config.data_path)?;

        let (classifiers, registry) = match ModelBundle::load(&config.models_path) {
            Ok(bundle) => {
                let registry = Arc::new(GenreRegistry::new(bundle.genre_classes.clone()));
                tracing::info!(
                    "Model bundle loaded from {} ({} genre classes)",
                    config.models_path.display(),
                    registry.len()
                );
                (ClassifierSet::from_bundle(bundle, registry.clone()), registry)
            }
            Err(e) => {
                tracing::warn!(
                    "Model bundle not available ({}). Running in degraded mode.",
                    e
                );
                (ClassifierSet::noop(), Arc::new(GenreRegistry::default_catalog()))
            }
        };

        let influence = Arc::new(GenreInfluenceTable::new());
        let analyzer = Arc::new(ReviewAnalyzer::new(
            classifiers,
            registry.clone(),
            influence.clone(),
            config.pipeline.clone(),
        ));

        let history_path = config.data_path.join("history.json");
        let store = Arc::new(HistoryStore::load_or_create(&history_path));
        tracing::info!("History loaded ({} entries)", store.len().await);

        Ok(Self {
            config,
            analyzer,
            store,
            influence,
            registry,
        })
    }
}
