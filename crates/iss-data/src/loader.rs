//! Reading both source documents into a fresh [`Dataset`].
//!
//! Loading is synchronous and blocking: it reads two files from disk and
//! decodes them in full. Async callers should run [`load`] on a blocking
//! thread.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::document::decode_file;
use crate::error::LoadError;

/// Default file name of the positional (OEM ephemeris) document.
pub const DEFAULT_POSITIONAL_PATH: &str = "ISS.OEM_J2K_EPH.xml";

/// Default file name of the sighting document.
pub const DEFAULT_SIGHTING_PATH: &str = "XMLsightingData_citiesUSA07.xml";

/// Locations of the two source documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    /// Positional state-vector document.
    pub positional: PathBuf,
    /// Sighting document.
    pub sighting: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            positional: PathBuf::from(DEFAULT_POSITIONAL_PATH),
            sighting: PathBuf::from(DEFAULT_SIGHTING_PATH),
        }
    }
}

/// Read, decode, and normalize both source documents.
///
/// Nothing is shared or mutated here; the caller decides when to publish
/// the returned dataset. Any failure leaves the caller's current dataset
/// as it was.
pub fn load(sources: &DataSources) -> Result<Dataset, LoadError> {
    debug!(path = %sources.sighting.display(), "decoding sighting document");
    let sighting = decode_file(&sources.sighting)?;

    debug!(path = %sources.positional.display(), "decoding positional document");
    let positional = decode_file(&sources.positional)?;

    let dataset = Dataset::from_documents(positional, sighting)?;

    info!(
        epochs = dataset.positional().len(),
        sightings = dataset.sightings().len(),
        loaded_at = %dataset.loaded_at(),
        "dataset loaded"
    );

    Ok(dataset)
}
