//! Typed records and labeled listings.
//!
//! Records keep every field of the source document in its original order
//! and serialize back to exactly that mapping. The fields the query engine
//! relies on (`EPOCH`, `country`, `region`, `city`) are validated and cached
//! when a record is built, so lookups never re-inspect raw values.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::RecordError;

/// Field holding the timestamp of a state vector.
pub const EPOCH_FIELD: &str = "EPOCH";

/// Extract a required string field from a raw record.
fn required_str(fields: &Map<String, Value>, key: &'static str) -> Result<String, RecordError> {
    match fields.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(RecordError::NonStringField(key)),
        None => Err(RecordError::MissingField(key)),
    }
}

// ---------------------------------------------------------------------------
// StateVector
// ---------------------------------------------------------------------------

/// One orbital state vector from the positional dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    epoch: String,
    fields: Map<String, Value>,
}

impl StateVector {
    /// The `EPOCH` timestamp of this state vector.
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// All fields of the record in source order.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for StateVector {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAMapping);
        };
        let epoch = required_str(&fields, EPOCH_FIELD)?;
        Ok(Self { epoch, fields })
    }
}

impl Serialize for StateVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// SightingRecord
// ---------------------------------------------------------------------------

/// One visible pass of the station over a city.
#[derive(Debug, Clone, PartialEq)]
pub struct SightingRecord {
    country: String,
    region: String,
    city: String,
    fields: Map<String, Value>,
}

impl SightingRecord {
    /// Country the sighting belongs to.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Region (state, province) within the country.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// City within the region.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The value of this record at the given hierarchy level.
    pub fn at(&self, level: Level) -> &str {
        match level {
            Level::Country => &self.country,
            Level::Region => &self.region,
            Level::City => &self.city,
        }
    }

    /// All fields of the record in source order.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for SightingRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAMapping);
        };
        Ok(Self {
            country: required_str(&fields, Level::Country.field())?,
            region: required_str(&fields, Level::Region.field())?,
            city: required_str(&fields, Level::City.field())?,
            fields,
        })
    }
}

impl Serialize for SightingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// A level of the sighting hierarchy, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// A country.
    Country,
    /// A region within a country.
    Region,
    /// A city within a region.
    City,
}

impl Level {
    /// Name of the record field that carries this level.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Region => "region",
            Self::City => "city",
        }
    }

    /// Label prefix used when enumerating the distinct values of this level.
    pub const fn list_label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Region => "Region",
            Self::City => "Cities",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

// ---------------------------------------------------------------------------
// Labeled
// ---------------------------------------------------------------------------

/// An ordered listing that serializes as `{"<prefix> 1": v1, "<prefix> 2": v2, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeled {
    prefix: &'static str,
    values: Vec<String>,
}

impl Labeled {
    /// Build a listing from values that are already in output order.
    pub const fn new(prefix: &'static str, values: Vec<String>) -> Self {
        Self { prefix, values }
    }

    /// The label prefix, e.g. `EPOCH` or `Country`.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The listed values in order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the listing has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(label, value)` pairs with 1-based labels.
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        (1_usize..)
            .zip(&self.values)
            .map(|(n, value)| (format!("{} {n}", self.prefix), value.as_str()))
    }
}

impl Serialize for Labeled {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (label, value) in self.entries() {
            map.serialize_entry(&label, value)?;
        }
        map.end()
    }
}
