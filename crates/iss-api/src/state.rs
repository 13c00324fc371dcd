//! Shared application state for the query API.
//!
//! [`AppState`] holds the configured document locations and the currently
//! published [`Dataset`]. The dataset slot starts empty; `POST
//! /download_data` builds a complete replacement off-lock and swaps the
//! pointer in, so readers either see the previous dataset or the new one,
//! never a partial one.

use std::sync::Arc;

use iss_data::{DataSources, Dataset, QueryError};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::error::ApiError;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Where the source documents are read from.
    pub sources: DataSources,
    /// The published dataset, `None` until the first successful load.
    dataset: Arc<RwLock<Option<Arc<Dataset>>>>,
    /// Serializes loads against each other; readers never take it.
    load_guard: Arc<Mutex<()>>,
}

impl AppState {
    /// Create application state with no dataset loaded.
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            dataset: Arc::new(RwLock::new(None)),
            load_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Create application state with `dataset` already published.
    pub fn with_dataset(sources: DataSources, dataset: Dataset) -> Self {
        Self {
            sources,
            dataset: Arc::new(RwLock::new(Some(Arc::new(dataset)))),
            load_guard: Arc::new(Mutex::new(())),
        }
    }

    /// The currently published dataset.
    ///
    /// The read lock is held only long enough to clone the pointer.
    pub async fn dataset(&self) -> Result<Arc<Dataset>, QueryError> {
        self.dataset
            .read()
            .await
            .as_ref()
            .map(Arc::clone)
            .ok_or(QueryError::NotLoaded)
    }

    /// Whether a dataset has been published.
    pub async fn is_loaded(&self) -> bool {
        self.dataset.read().await.is_some()
    }

    /// Load both source documents and publish the result.
    ///
    /// Decoding runs on a blocking thread. On failure the previously
    /// published dataset, if any, stays in place.
    pub async fn reload(&self) -> Result<Arc<Dataset>, ApiError> {
        let _guard = self.load_guard.lock().await;

        let sources = self.sources.clone();
        let dataset = tokio::task::spawn_blocking(move || iss_data::load(&sources))
            .await
            .map_err(|e| ApiError::Internal(format!("load task failed: {e}")))??;
        let dataset = Arc::new(dataset);

        *self.dataset.write().await = Some(Arc::clone(&dataset));
        info!(
            epochs = dataset.positional().len(),
            sightings = dataset.sightings().len(),
            "dataset published"
        );

        Ok(dataset)
    }
}
