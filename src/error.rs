// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! [`ScheduleError`] covers everything that can go wrong between loading the
//! dataset and classifying an instant. None of it is fatal to a host: the
//! [`Resolver`](crate::Resolver) turns every variant into a display label.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::Prayer;

/// Failure while loading, looking up, or interpreting a schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The dataset file could not be opened or read.
    #[error("schedule dataset not found at {}", path.display())]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not an array of complete schedule records.
    #[error("malformed schedule dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// No record matches the date and locality. Expected before a location
    /// fix or outside the dataset's coverage.
    #[error("no schedule for {region}/{city} on {date}")]
    NotFound {
        date: String,
        region: String,
        city: String,
    },

    /// A time-of-day field is not `HH:mm`.
    #[error("malformed {prayer} time {value:?}")]
    MalformedTime { prayer: Prayer, value: String },

    /// The local time does not exist on that date (DST gap).
    #[error("{prayer} at {time} does not exist on {date} in the local calendar")]
    UnrepresentableTime {
        prayer: Prayer,
        date: NaiveDate,
        time: NaiveTime,
    },
}

impl ScheduleError {
    /// `true` for errors caused by a bad record rather than a missing one.
    pub fn is_invalid_schedule(&self) -> bool {
        matches!(
            self,
            ScheduleError::MalformedTime { .. } | ScheduleError::UnrepresentableTime { .. }
        )
    }
}

/// A string that is not one of the six period names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prayer name {0:?}")]
pub struct UnknownPrayer(pub String);

/// Failure while reading a [`ResolverConfig`](crate::ResolverConfig) file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
