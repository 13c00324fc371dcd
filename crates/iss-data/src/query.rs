//! Indexed and hierarchical lookups over a loaded [`Dataset`].
//!
//! Epochs are addressed by their 1-based position. Sightings are addressed
//! through the containment chain country → region → city: every level is a
//! [`Selection`] that is narrowed from its parent selection, never from the
//! full dataset, so a region lookup only ever sees records of the country
//! it was reached through.

use std::collections::HashSet;
use std::num::IntErrorKind;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::QueryError;
use crate::record::{Labeled, Level, SightingRecord, StateVector};

/// Label prefix for epoch listings.
pub const EPOCH_LABEL: &str = "EPOCH";

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The sighting records matched at one hierarchy level.
///
/// Serializes as `{"<name> Info": [record, ...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    level: Level,
    name: String,
    records: Vec<&'a SightingRecord>,
}

impl<'a> Selection<'a> {
    /// Keep the records from `candidates` whose value at `level` equals
    /// `name` exactly.
    ///
    /// Fails with [`QueryError::NotFound`] when nothing matches.
    fn filter<I>(candidates: I, level: Level, name: &str) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = &'a SightingRecord>,
    {
        let records: Vec<&SightingRecord> = candidates
            .into_iter()
            .filter(|record| record.at(level) == name)
            .collect();

        if records.is_empty() {
            debug!(%level, name, "no sightings matched");
            return Err(QueryError::NotFound {
                level,
                name: name.to_owned(),
            });
        }

        Ok(Self {
            level,
            name: name.to_owned(),
            records,
        })
    }

    /// Narrow this selection to the records whose value at `level` equals
    /// `name`.
    pub fn narrow(&self, level: Level, name: &str) -> Result<Self, QueryError> {
        Self::filter(self.records.iter().copied(), level, name)
    }

    /// Distinct values at `level` among the selected records, in first-seen
    /// order.
    pub fn distinct(&self, level: Level) -> Labeled {
        distinct(self.records.iter().copied(), level)
    }

    /// The level this selection was made at.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The name this selection was made by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The matched records, in source order.
    pub fn records(&self) -> &[&'a SightingRecord] {
        &self.records
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a selection returned by a lookup.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The key this selection is reported under.
    pub fn info_key(&self) -> String {
        format!("{} Info", self.name)
    }
}

impl Serialize for Selection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.info_key(), &self.records)?;
        map.end()
    }
}

/// Enumerate distinct values at `level`, preserving first occurrence.
fn distinct<'a, I>(records: I, level: Level) -> Labeled
where
    I: IntoIterator<Item = &'a SightingRecord>,
{
    let mut seen = HashSet::new();
    let values = records
        .into_iter()
        .map(|record| record.at(level))
        .filter(|value| seen.insert(*value))
        .map(str::to_owned)
        .collect();
    Labeled::new(level.list_label(), values)
}

// ---------------------------------------------------------------------------
// Dataset queries
// ---------------------------------------------------------------------------

impl Dataset {
    /// Every epoch timestamp labeled `EPOCH 1..N` in sequence order.
    pub fn list_epochs(&self) -> Labeled {
        let values = self
            .positional()
            .iter()
            .map(|vector| vector.epoch().to_owned())
            .collect();
        Labeled::new(EPOCH_LABEL, values)
    }

    /// The state vector at 1-based `index`.
    pub fn epoch_at(&self, index: i64) -> Result<&StateVector, QueryError> {
        let out_of_range = || QueryError::IndexOutOfRange {
            index: index.to_string(),
            len: self.positional().len(),
        };

        let position = index
            .checked_sub(1)
            .and_then(|zero_based| usize::try_from(zero_based).ok())
            .ok_or_else(out_of_range)?;

        self.positional().get(position).ok_or_else(out_of_range)
    }

    /// The state vector addressed by the index text from a request path.
    ///
    /// Text that is not an integer is an [`QueryError::InvalidArgument`];
    /// an integer too large to represent is out of range like any other
    /// index past the end.
    pub fn get_epoch(&self, index: &str) -> Result<&StateVector, QueryError> {
        match index.parse::<i64>() {
            Ok(index) => self.epoch_at(index),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Err(QueryError::IndexOutOfRange {
                    index: index.to_owned(),
                    len: self.positional().len(),
                })
            }
            Err(_) => Err(QueryError::InvalidArgument(index.to_owned())),
        }
    }

    /// Distinct countries labeled `Country 1..` in first-seen order.
    pub fn list_countries(&self) -> Labeled {
        distinct(self.sightings(), Level::Country)
    }

    /// All sightings in `country`.
    pub fn get_country(&self, country: &str) -> Result<Selection<'_>, QueryError> {
        Selection::filter(self.sightings(), Level::Country, country)
    }

    /// Distinct regions of `country` labeled `Region 1..`.
    pub fn list_regions(&self, country: &str) -> Result<Labeled, QueryError> {
        Ok(self.get_country(country)?.distinct(Level::Region))
    }

    /// All sightings in `region` of `country`.
    pub fn get_region(&self, country: &str, region: &str) -> Result<Selection<'_>, QueryError> {
        self.get_country(country)?.narrow(Level::Region, region)
    }

    /// Distinct cities of `region` in `country` labeled `Cities 1..`.
    pub fn list_cities(&self, country: &str, region: &str) -> Result<Labeled, QueryError> {
        Ok(self.get_region(country, region)?.distinct(Level::City))
    }

    /// All sightings in `city` of `region` in `country`.
    pub fn get_city(
        &self,
        country: &str,
        region: &str,
        city: &str,
    ) -> Result<Selection<'_>, QueryError> {
        self.get_region(country, region)?.narrow(Level::City, city)
    }
}
