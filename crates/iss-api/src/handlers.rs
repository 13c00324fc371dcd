//! REST endpoint handlers for the query API.
//!
//! Every query handler resolves the published [`Dataset`] from the shared
//! [`AppState`], runs one lookup, and renders the result exactly once.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/download_data` | Load both datasets |
//! | `GET` | `/how_to_use` | Usage text |
//! | `GET` | `/epochs` | List all epochs |
//! | `GET` | `/epochs/{epoch}` | Single state vector |
//! | `GET` | `/countries` | List countries with sightings |
//! | `GET` | `/countries/{country}` | All sightings in a country |
//! | `GET` | `/countries/{country}/regions` | List regions of a country |
//! | `GET` | `/countries/{country}/regions/{region}` | All sightings in a region |
//! | `GET` | `/countries/{country}/regions/{region}/cities` | List cities of a region |
//! | `GET` | `/countries/{country}/regions/{region}/cities/{city}` | All sightings in a city |
//!
//! [`Dataset`]: iss_data::Dataset

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use tracing::debug;

use crate::error::ApiError;
use crate::response::pretty_json;
use crate::state::AppState;

/// Confirmation returned by `POST /download_data`.
pub const LOADED_MESSAGE: &str = "Data has been loaded.\n";

/// Usage text returned by `GET /how_to_use`.
pub const USAGE: &str = "\
ISS Tracker

Query positional and sighting data for the International Space Station.

Both datasets must be loaded before any query route will answer:
  POST /download_data
      load the positional and sighting datasets

Positional data (GET):
  /epochs
      every epoch, labeled by number
  /epochs/<epoch>
      the full state vector for one epoch number (starting at 1)

Sighting data (GET):
  /countries
      every country with sightings
  /countries/<country>
      all sightings in a country
  /countries/<country>/regions
      every region of a country with sightings
  /countries/<country>/regions/<region>
      all sightings in a region of a country
  /countries/<country>/regions/<region>/cities
      every city of a region with sightings
  /countries/<country>/regions/<region>/cities/<city>
      all sightings in a city
";

// ---------------------------------------------------------------------------
// Loading and usage
// ---------------------------------------------------------------------------

/// Load both source documents and publish them for all query routes.
pub async fn download_data(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ApiError> {
    debug!("download_data");
    state.reload().await?;
    Ok(LOADED_MESSAGE)
}

/// Describe the available routes.
pub async fn how_to_use() -> &'static str {
    debug!("how_to_use");
    USAGE
}

// ---------------------------------------------------------------------------
// Epochs
// ---------------------------------------------------------------------------

/// List every epoch timestamp as `{"EPOCH 1": ..., ...}`.
pub async fn list_epochs(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    debug!("list_epochs");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.list_epochs())
}

/// Return the full state vector at a 1-based epoch number.
pub async fn get_epoch(
    State(state): State<Arc<AppState>>,
    Path(epoch): Path<String>,
) -> Result<Response, ApiError> {
    debug!(%epoch, "get_epoch");
    let dataset = state.dataset().await?;
    pretty_json(dataset.get_epoch(&epoch)?)
}

// ---------------------------------------------------------------------------
// Sightings
// ---------------------------------------------------------------------------

/// List every country with sightings as `{"Country 1": ..., ...}`.
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    debug!("list_countries");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.list_countries())
}

/// Return all sightings in a country as `{"<country> Info": [...]}`.
pub async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Result<Response, ApiError> {
    debug!(%country, "get_country");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.get_country(&country)?)
}

/// List the regions of a country as `{"Region 1": ..., ...}`.
pub async fn list_regions(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Result<Response, ApiError> {
    debug!(%country, "list_regions");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.list_regions(&country)?)
}

/// Return all sightings in a region as `{"<region> Info": [...]}`.
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path((country, region)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    debug!(%country, %region, "get_region");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.get_region(&country, &region)?)
}

/// List the cities of a region as `{"Cities 1": ..., ...}`.
pub async fn list_cities(
    State(state): State<Arc<AppState>>,
    Path((country, region)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    debug!(%country, %region, "list_cities");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.list_cities(&country, &region)?)
}

/// Return all sightings in a city as `{"<city> Info": [...]}`.
pub async fn get_city(
    State(state): State<Arc<AppState>>,
    Path((country, region, city)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    debug!(%country, %region, %city, "get_city");
    let dataset = state.dataset().await?;
    pretty_json(&dataset.get_city(&country, &region, &city)?)
}
