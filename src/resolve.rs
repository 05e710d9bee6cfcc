// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Resolution façade: locality + instant → label + next boundary.
//!
//! Resolution is a pure function of the dataset, the locality and the
//! instant. Hosts call it on every tick; nothing is cached between calls and
//! no error ever escapes: failures become labels.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::{debug, error, trace};

use crate::boundary::{local_instant, parse_time_of_day};
use crate::{
    classify, date_key, Countdown, Labels, Locality, Overnight, Prayer, ResolverConfig,
    ScheduleDataset,
};

/// Outcome category of a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// `now` falls in this period.
    Active(Prayer),
    /// No record for this date and locality.
    Unavailable,
    /// The matching record has a malformed time.
    InvalidSchedule,
}

/// What a host displays for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<Tz: TimeZone> {
    pub label: String,
    pub status: ResolutionStatus,
    pub next_boundary: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Resolution<Tz> {
    fn failed(status: ResolutionStatus, labels: &Labels) -> Self {
        let label = match status {
            ResolutionStatus::InvalidSchedule => labels.invalid.clone(),
            _ => labels.unavailable.clone(),
        };
        Self {
            label,
            status,
            next_boundary: None,
        }
    }

    /// The active period, if resolution succeeded.
    pub fn prayer(&self) -> Option<Prayer> {
        match self.status {
            ResolutionStatus::Active(prayer) => Some(prayer),
            _ => None,
        }
    }

    /// Countdown from `now` to this resolution's next boundary.
    pub fn countdown<Tz2: TimeZone>(&self, now: &DateTime<Tz2>) -> Countdown {
        Countdown::between(now, self.next_boundary.as_ref())
    }
}

/// Resolves instants against a shared, read-only dataset.
#[derive(Debug, Clone)]
pub struct Resolver {
    dataset: Arc<ScheduleDataset>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(dataset: impl Into<Arc<ScheduleDataset>>, config: ResolverConfig) -> Self {
        Self {
            dataset: dataset.into(),
            config,
        }
    }

    /// Loads the dataset at `path`. A missing or malformed dataset is logged
    /// and replaced by an empty one, so every resolution reports the
    /// `unavailable` label instead of failing.
    pub fn load_or_degraded(path: impl AsRef<Path>, config: ResolverConfig) -> Self {
        let dataset = ScheduleDataset::load(path).unwrap_or_else(|err| {
            error!("Schedule dataset unavailable, resolving nothing: {}", err);
            ScheduleDataset::default()
        });
        Self::new(dataset, config)
    }

    pub fn dataset(&self) -> &ScheduleDataset {
        &self.dataset
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn labels(&self) -> &Labels {
        &self.config.labels
    }

    /// Resolves `now` at `locality`.
    pub fn resolve<Tz: TimeZone>(&self, locality: &Locality, now: &DateTime<Tz>) -> Resolution<Tz> {
        resolve_with(&self.dataset, &self.config, locality, now)
    }

    /// Label and countdown string for `now` at `locality`.
    pub fn display<Tz: TimeZone>(&self, locality: &Locality, now: &DateTime<Tz>) -> (String, String) {
        let resolution = self.resolve(locality, now);
        let countdown = resolution.countdown(now).render(self.labels());
        (resolution.label, countdown)
    }
}

/// Resolves `now` at `region`/`city` with the default configuration.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use miqat::{resolve, ScheduleDataset};
///
/// let dataset = ScheduleDataset::from_json_str(r#"[{
///     "province": "X", "city": "Y", "date": "05/05/24",
///     "fajr": "05:00", "sunrise": "06:30", "dhuhr": "12:15",
///     "asr": "15:45", "maghrib": "18:20", "isha": "19:45"
/// }]"#).unwrap();
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 5, 13, 0, 0).unwrap();
/// let resolution = resolve(&dataset, "X", "Y", &now);
/// assert_eq!(resolution.label, "Dhuhr");
///
/// let missing = resolve(&dataset, "X", "Z", &now);
/// assert_eq!(missing.label, "Error loading prayer times");
/// assert!(missing.next_boundary.is_none());
/// ```
pub fn resolve<Tz: TimeZone>(
    dataset: &ScheduleDataset,
    region: &str,
    city: &str,
    now: &DateTime<Tz>,
) -> Resolution<Tz> {
    resolve_with(
        dataset,
        &ResolverConfig::default(),
        &Locality::new(region, city),
        now,
    )
}

fn resolve_with<Tz: TimeZone>(
    dataset: &ScheduleDataset,
    config: &ResolverConfig,
    locality: &Locality,
    now: &DateTime<Tz>,
) -> Resolution<Tz> {
    let date = date_key(&now.date_naive());
    let record = match dataset.lookup_locality(&date, locality) {
        Ok(record) => record,
        Err(err) => {
            debug!("Resolution unavailable: {}", err);
            return Resolution::failed(ResolutionStatus::Unavailable, &config.labels);
        }
    };

    let classification = match classify(record, now) {
        Ok(classification) => classification,
        Err(err) => {
            let status = if err.is_invalid_schedule() {
                ResolutionStatus::InvalidSchedule
            } else {
                ResolutionStatus::Unavailable
            };
            return Resolution::failed(status, &config.labels);
        }
    };

    let prayer = classification.prayer();
    let next_boundary = match (classification.next_boundary, config.overnight) {
        (Some(next), _) => Some(next),
        (None, Overnight::SameDay) => None,
        (None, Overnight::NextFajr) => next_day_fajr(dataset, locality, now),
    };
    trace!("{} at {}: {}", locality, date, prayer);

    Resolution {
        label: prayer.name().to_string(),
        status: ResolutionStatus::Active(prayer),
        next_boundary,
    }
}

/// Fajr of the calendar day after `now` at `locality`, if the dataset has a
/// valid record for it.
fn next_day_fajr<Tz: TimeZone>(
    dataset: &ScheduleDataset,
    locality: &Locality,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let tomorrow = now.date_naive().succ_opt()?;
    let record = dataset
        .lookup_locality(&date_key(&tomorrow), locality)
        .ok()?;
    parse_time_of_day(Prayer::Fajr, &record.fajr)
        .and_then(|time| local_instant(&now.timezone(), Prayer::Fajr, tomorrow, time))
        .inspect_err(|err| debug!("No overnight boundary for {}: {}", locality, err))
        .ok()
}
