//! HTTP query API for ISS positional and sighting data.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`POST /download_data`** to load (or reload) both datasets
//! - **Epoch endpoints** for the positional state vectors
//! - **Sighting endpoints** walking the country → region → city hierarchy
//! - **`GET /how_to_use`** with a plain-text route summary
//!
//! # Architecture
//!
//! Handlers read an immutable [`Dataset`] published in [`AppState`]. A
//! load builds a complete replacement and swaps it in, so readers never
//! block on a load and never see a half-built dataset. Until the first
//! load every query answers `503 Service Unavailable`.
//!
//! Successful payloads are JSON with a one-space indent and a trailing
//! newline; errors are `{"error": ..., "status": ...}`.
//!
//! [`Dataset`]: iss_data::Dataset

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
