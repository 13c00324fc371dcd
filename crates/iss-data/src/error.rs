//! Error types for the `iss-data` crate.
//!
//! Loading failures are reported through [`LoadError`] (the data is
//! unavailable), while lookups over an already-loaded dataset fail with
//! [`QueryError`].

use std::path::PathBuf;

use crate::record::Level;

/// Errors produced while decoding a source document into a generic
/// nested value.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document ended while elements were still open.
    #[error("document ended inside <{0}>")]
    Unclosed(String),

    /// The document has no root element.
    #[error("document has no root element")]
    Empty,

    /// The file extension does not name a supported format.
    #[error("unsupported document format: {0:?}")]
    UnsupportedFormat(Option<String>),
}

/// A raw record could not be turned into a typed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record is a scalar or a list instead of a field mapping.
    #[error("record is not a field mapping")]
    NotAMapping,

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A required field is present but is not a string.
    #[error("field `{0}` is not a string")]
    NonStringField(&'static str),
}

/// The source documents could not be read, decoded, or normalized.
///
/// Every variant means the dataset is unavailable; a failed load leaves
/// any previously loaded dataset untouched and may simply be retried.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document could not be decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// The document path.
        path: PathBuf,
        /// The underlying decode error.
        source: DocumentError,
    },

    /// The decoded document does not contain the expected record sequence.
    #[error("{document} document has no sequence at `{path}`")]
    MissingSequence {
        /// Which dataset the document was meant to provide.
        document: &'static str,
        /// Dotted path of the expected sequence.
        path: &'static str,
    },

    /// A record inside the sequence is malformed.
    #[error("{document} record {position} is malformed: {source}")]
    MalformedRecord {
        /// Which dataset the record belongs to.
        document: &'static str,
        /// 1-based position of the record in its sequence.
        position: usize,
        /// What is wrong with the record.
        source: RecordError,
    },
}

/// Errors that can occur when querying a dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No dataset has been loaded yet.
    #[error("data has not been loaded; POST /download_data first")]
    NotLoaded,

    /// The epoch index is not an integer.
    #[error("invalid epoch index {0:?}: expected an integer")]
    InvalidArgument(String),

    /// The epoch index is outside `1..=len`.
    #[error("epoch {index} is out of range (1..={len})")]
    IndexOutOfRange {
        /// The requested index as given.
        index: String,
        /// Number of epochs in the dataset.
        len: usize,
    },

    /// No record matched at the given hierarchy level.
    #[error("no {level} named {name:?} has sighting data")]
    NotFound {
        /// The hierarchy level that came up empty.
        level: Level,
        /// The name that was requested at that level.
        name: String,
    },
}
