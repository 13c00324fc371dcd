//! ISS tracker binary.
//!
//! Serves the positional and sighting query API over HTTP.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `iss-config.yaml` (or `$ISS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Optionally preload both source documents
//! 4. Serve until Ctrl-C

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use iss_api::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, TrackerConfig};
use crate::error::TrackerError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a requested preload
/// fails, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    let config_path =
        std::env::var("ISS_CONFIG").map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = TrackerConfig::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        host = config.server.host.as_str(),
        port = config.server.port,
        preload = config.data.preload,
        "iss-tracker starting"
    );

    let sources = config.data_sources();
    let state = if config.data.preload {
        let dataset = iss_data::load(&sources).inspect_err(|e| {
            tracing::error!(error = %e, "preload failed");
        })?;
        info!(
            state_vectors = dataset.positional().len(),
            sightings = dataset.sightings().len(),
            "data preloaded"
        );
        AppState::with_dataset(sources, dataset)
    } else {
        AppState::new(sources)
    };

    iss_api::start_server(&config.server_config(), Arc::new(state)).await?;

    info!("iss-tracker stopped");
    Ok(())
}
