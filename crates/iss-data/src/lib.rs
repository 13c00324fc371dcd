//! Dataset loading and hierarchical queries for ISS tracking data.
//!
//! Two datasets are served: the station's positional state vectors (an
//! OEM ephemeris) and the visible-pass sighting records for cities around
//! the world.
//!
//! # Modules
//!
//! - [`document`] -- Decoding XML and JSON documents into generic nested
//!   values.
//! - [`dataset`] -- The immutable [`Dataset`] and its normalization from
//!   decoded documents.
//! - [`loader`] -- [`load`] reads both configured documents into a fresh
//!   dataset.
//! - [`query`] -- Epoch lookups and the country → region → city
//!   [`Selection`] chain.
//! - [`record`] -- Typed records, hierarchy levels, and labeled listings.
//! - [`error`] -- Load and query error types.

pub mod dataset;
pub mod document;
pub mod error;
pub mod loader;
pub mod query;
pub mod record;

// Re-export primary types at crate root.
pub use dataset::Dataset;
pub use error::{DocumentError, LoadError, QueryError, RecordError};
pub use loader::{DataSources, load};
pub use query::Selection;
pub use record::{Labeled, Level, SightingRecord, StateVector};
