use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::SentiraError;
use crate::models::ReviewResult;

/// One stored analysis with its submission timestamp. The timestamp stays a
/// store-level detail; API responses never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub result: ReviewResult,
    pub created_at: DateTime<Utc>,
}

/// On-disk envelope for the history file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HistoryFile {
    entries: Vec<HistoryEntry>,
}

/// Append-only history of analysis results, persisted to a JSON file.
///
/// All mutation goes through a single writer lock, and every mutation
/// rewrites the file via a temp file plus atomic rename, so readers never
/// observe a half-written history and concurrent appends cannot drop each
/// other's entries.
pub struct HistoryStore {
    file_path: PathBuf,
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl HistoryStore {
    /// Load history from disk or start empty.
    ///
    /// An unreadable or unparseable file logs a warning and starts empty
    /// rather than refusing to boot; the broken file is overwritten on the
    /// next append.
    pub fn load_or_create(path: &Path) -> Self {
        let entries = if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<HistoryFile>(&json) {
                    Ok(file) => file.entries,
                    Err(e) => {
                        warn!(
                            "Failed to parse history file {}: {}. Starting empty.",
                            path.display(),
                            e
                        );
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to read history file {}: {}. Starting empty.",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Self {
            file_path: path.to_path_buf(),
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Snapshot the stored results in submission order.
    pub async fn load(&self) -> Vec<ReviewResult> {
        let entries = self.entries.read().await;
        entries.iter().map(|e| e.result.clone()).collect()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Append a batch of results and persist, returning the snapshot of
    /// everything stored so far (submission order).
    pub async fn append(&self, results: &[ReviewResult]) -> Result<Vec<ReviewResult>, SentiraError> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        for result in results {
            entries.push(HistoryEntry {
                result: result.clone(),
                created_at: now,
            });
        }
        self.persist(&entries)?;
        Ok(entries.iter().map(|e| e.result.clone()).collect())
    }

    /// Drop all stored entries and persist the empty history.
    pub async fn clear(&self) -> Result<(), SentiraError> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.persist(&entries)
    }

    /// Write the full history to a temp file and rename it into place.
    /// Called with the write lock held.
    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), SentiraError> {
        let file = HistoryFile {
            entries: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| SentiraError::Store(format!("Failed to serialize history: {}", e)))?;

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SentiraError::Store(format!("Failed to create history directory: {}", e))
            })?;
        }

        let temp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)
            .map_err(|e| SentiraError::Store(format!("Failed to write history: {}", e)))?;
        std::fs::rename(&temp_path, &self.file_path)
            .map_err(|e| SentiraError::Store(format!("Failed to replace history: {}", e)))?;

        Ok(())
    }
}
