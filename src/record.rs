// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Schedule records and localities.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Prayer;

/// `chrono` format of the record date key (`dd/mm/yy`).
pub const DATE_KEY_FORMAT: &str = "%d/%m/%y";

/// Label used by location services before a place is known.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Formats a calendar date as a record date key, e.g. `05/05/24`.
///
/// ```
/// use chrono::NaiveDate;
/// use miqat::date_key;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
/// assert_eq!(date_key(&date), "05/05/24");
/// ```
pub fn date_key<D: Datelike>(date: &D) -> String {
    format!(
        "{:02}/{:02}/{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Parses a `dd/mm/yy` key back to a date, using `chrono`'s two-digit year pivot.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// A (region, city) pair identifying where a schedule applies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Locality {
    pub region: String,
    pub city: String,
}

impl Locality {
    pub fn new(region: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            city: city.into(),
        }
    }

    /// The placeholder reported before reverse geocoding succeeds. It never
    /// matches a record.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PLACE, UNKNOWN_PLACE)
    }

    pub fn is_unknown(&self) -> bool {
        self.region == UNKNOWN_PLACE && self.city == UNKNOWN_PLACE
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// One dataset row: six `HH:mm` boundaries for a locality on a date.
///
/// Values are kept exactly as they appear in the dataset; times are only
/// parsed when a record is classified, so one bad row never poisons the
/// rest of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(rename = "province", alias = "region")]
    pub region: String,
    pub city: String,
    /// `dd/mm/yy`.
    pub date: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl ScheduleRecord {
    /// Raw `HH:mm` text of the boundary that starts `prayer`.
    pub fn time_of(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Sunrise => &self.sunrise,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    pub fn locality(&self) -> Locality {
        Locality::new(self.region.clone(), self.city.clone())
    }

    /// Exact, case-sensitive match on all three keys.
    pub fn matches(&self, date: &str, region: &str, city: &str) -> bool {
        self.date == date && self.region == region && self.city == city
    }
}
