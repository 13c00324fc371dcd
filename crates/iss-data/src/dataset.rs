//! The immutable in-memory dataset and its normalization from documents.
//!
//! A [`Dataset`] is built once from the two decoded source documents and
//! never mutated afterwards. Reloading produces a fresh `Dataset` that the
//! caller swaps in wholesale.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{LoadError, RecordError};
use crate::record::{SightingRecord, StateVector};

/// Where a record sequence lives inside a decoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePath {
    /// Which dataset the document provides.
    pub document: &'static str,
    /// Nested mapping keys leading to the sequence, outermost first.
    pub keys: &'static [&'static str],
    /// The same path written with dots, for error messages.
    pub dotted: &'static str,
}

/// Location of the state-vector sequence in the positional document.
pub const POSITIONAL_PATH: SequencePath = SequencePath {
    document: "positional",
    keys: &["ndm", "oem", "body", "segment", "data", "stateVector"],
    dotted: "ndm.oem.body.segment.data.stateVector",
};

/// Location of the visible-pass sequence in the sighting document.
pub const SIGHTING_PATH: SequencePath = SequencePath {
    document: "sighting",
    keys: &["visible_passes", "visible_pass"],
    dotted: "visible_passes.visible_pass",
};

/// Both datasets, fully normalized.
#[derive(Debug, Clone)]
pub struct Dataset {
    positional: Vec<StateVector>,
    sightings: Vec<SightingRecord>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from already-typed records.
    pub fn new(positional: Vec<StateVector>, sightings: Vec<SightingRecord>) -> Self {
        Self {
            positional,
            sightings,
            loaded_at: Utc::now(),
        }
    }

    /// Normalize the two decoded documents into a dataset.
    ///
    /// Each document must contain its record sequence at the expected path.
    /// A sequence that decoded to a single mapping (one record in the
    /// source) is treated as a one-element sequence, and an absent or empty
    /// final element yields an empty sequence. Any malformed record rejects
    /// the whole document.
    pub fn from_documents(positional: Value, sighting: Value) -> Result<Self, LoadError> {
        let positional = normalize(positional, POSITIONAL_PATH)?;
        let sightings = normalize(sighting, SIGHTING_PATH)?;
        Ok(Self::new(positional, sightings))
    }

    /// State vectors in source order.
    pub fn positional(&self) -> &[StateVector] {
        &self.positional
    }

    /// Sighting records in source order.
    pub fn sightings(&self) -> &[SightingRecord] {
        &self.sightings
    }

    /// When this dataset was built.
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Extract the sequence at `path` and convert every entry into `T`.
fn normalize<T>(document: Value, path: SequencePath) -> Result<Vec<T>, LoadError>
where
    T: TryFrom<Value, Error = RecordError>,
{
    take_sequence(document, path)?
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            T::try_from(raw).map_err(|source| LoadError::MalformedRecord {
                document: path.document,
                position: index.saturating_add(1),
                source,
            })
        })
        .collect()
}

/// Walk `path` through nested mappings and return the records found there.
fn take_sequence(document: Value, path: SequencePath) -> Result<Vec<Value>, LoadError> {
    let missing = || LoadError::MissingSequence {
        document: path.document,
        path: path.dotted,
    };

    let Some((leaf, parents)) = path.keys.split_last() else {
        return Err(missing());
    };

    let mut cursor = document;
    for key in parents {
        cursor = match cursor {
            Value::Object(mut map) => map.remove(*key).ok_or_else(missing)?,
            _ => return Err(missing()),
        };
    }

    let Value::Object(mut container) = cursor else {
        return Err(missing());
    };

    match container.remove(*leaf) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(single) => Ok(vec![single]),
    }
}
