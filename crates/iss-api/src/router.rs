//! Axum router construction for the query API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query API.
///
/// The router includes:
/// - `POST /download_data` -- load both datasets
/// - `GET /how_to_use` -- usage text
/// - `GET /epochs` and `GET /epochs/{epoch}` -- positional data
/// - `GET /countries/...` -- the country → region → city sighting chain
///
/// Path segments are percent-decoded before they reach the handlers, so
/// `/countries/United%20States` looks up `United States`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Loading and usage
        .route("/download_data", post(handlers::download_data))
        .route("/how_to_use", get(handlers::how_to_use))
        // Positional data
        .route("/epochs", get(handlers::list_epochs))
        .route("/epochs/{epoch}", get(handlers::get_epoch))
        // Sighting data
        .route("/countries", get(handlers::list_countries))
        .route("/countries/{country}", get(handlers::get_country))
        .route("/countries/{country}/regions", get(handlers::list_regions))
        .route(
            "/countries/{country}/regions/{region}",
            get(handlers::get_region),
        )
        .route(
            "/countries/{country}/regions/{region}/cities",
            get(handlers::list_cities),
        )
        .route(
            "/countries/{country}/regions/{region}/cities/{city}",
            get(handlers::get_city),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
