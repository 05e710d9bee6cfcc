// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Schedule dataset loading and lookup.
//!
//! The dataset is a JSON array of [`ScheduleRecord`]s:
//!
//! ```json
//! [
//!   {
//!     "province": "Ontario", "city": "Toronto", "date": "05/05/24",
//!     "fajr": "04:21", "sunrise": "06:06", "dhuhr": "13:14",
//!     "asr": "17:07", "maghrib": "20:22", "isha": "21:59"
//!   }
//! ]
//! ```
//!
//! It is read once and never mutated, so a loaded [`ScheduleDataset`] can be
//! shared freely between threads.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{Locality, ScheduleError, ScheduleRecord};

/// Position of the first record for each `date → region → city`.
///
/// Nested so that lookups can probe with borrowed `&str` keys.
type RecordIndex = HashMap<String, HashMap<String, HashMap<String, usize>>>;

/// An immutable, indexed collection of schedule records.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDataset {
    records: Vec<ScheduleRecord>,
    index: RecordIndex,
}

impl ScheduleDataset {
    /// Builds a dataset from records in dataset order.
    ///
    /// When several records share a key the first one wins.
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        let mut index = RecordIndex::new();
        for (position, record) in records.iter().enumerate() {
            let cities = index
                .entry(record.date.clone())
                .or_default()
                .entry(record.region.clone())
                .or_default();
            if let Some(first) = cities.get(&record.city) {
                warn!(
                    "Duplicate schedule for {}/{} on {} at position {} (keeping position {})",
                    record.region, record.city, record.date, position, first
                );
                continue;
            }
            cities.insert(record.city.clone(), position);
        }
        Self { records, index }
    }

    /// Reads and parses the dataset file at `path`.
    ///
    /// # Errors
    /// [`ScheduleError::ResourceMissing`] if the file cannot be opened,
    /// [`ScheduleError::Parse`] if its content is not an array of complete
    /// records (including content that is not UTF-8).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        info!("Loading schedule dataset from: {}", path.display());

        let file = File::open(path).map_err(|source| ScheduleError::ResourceMissing {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} schedule record(s) for {} localit(ies)",
            dataset.len(),
            dataset.localities().len()
        );
        Ok(dataset)
    }

    /// Parses a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let records: Vec<ScheduleRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Parses a dataset from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScheduleError> {
        let records: Vec<ScheduleRecord> = serde_json::from_reader(reader)?;
        Ok(Self::new(records))
    }

    /// Finds the record for `date` (`dd/mm/yy`) at `region`/`city`.
    ///
    /// Matching is exact and case-sensitive on all three keys.
    ///
    /// # Errors
    /// [`ScheduleError::NotFound`] if no record matches.
    pub fn lookup(
        &self,
        date: &str,
        region: &str,
        city: &str,
    ) -> Result<&ScheduleRecord, ScheduleError> {
        let position = self
            .index
            .get(date)
            .and_then(|regions| regions.get(region))
            .and_then(|cities| cities.get(city));
        match position {
            Some(&position) => Ok(&self.records[position]),
            None => {
                debug!("No schedule for {}/{} on {}", region, city, date);
                Err(ScheduleError::NotFound {
                    date: date.to_string(),
                    region: region.to_string(),
                    city: city.to_string(),
                })
            }
        }
    }

    /// [`lookup`](Self::lookup) keyed by a [`Locality`].
    pub fn lookup_locality(
        &self,
        date: &str,
        locality: &Locality,
    ) -> Result<&ScheduleRecord, ScheduleError> {
        self.lookup(date, &locality.region, &locality.city)
    }

    /// All records in dataset order, duplicates included.
    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct localities covered by the dataset, sorted by region then city.
    pub fn localities(&self) -> Vec<Locality> {
        self.records
            .iter()
            .map(ScheduleRecord::locality)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
