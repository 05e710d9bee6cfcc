// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer-time resolution.
//!
//! Given a dataset of daily prayer schedules, a locality and an instant, this
//! crate finds the schedule for that day, tells which period the instant falls
//! in, and counts down to the next boundary.
//!
//! # Core types
//!
//! - [`ScheduleDataset`] — the read-only, indexed collection of [`ScheduleRecord`]s.
//! - [`Prayer`] — the six periods of a day, in order.
//! - [`DayBoundaries`] — a record's six `HH:mm` times placed on a calendar day.
//! - [`PrayerPeriod`] — a half-open `[start, end)` interval labelled by its [`Prayer`].
//! - [`Countdown`] — time left until the next boundary, or why there is none.
//! - [`Resolver`] — dataset + [`ResolverConfig`]; resolves `(locality, now)` to a [`Resolution`].
//! - [`PrayerBoard`] — a [`Resolver`] driven by a host [`Clock`] and [`LocalityProvider`].
//!
//! # Data flow
//!
//! ```text
//! (locality, now) ─► ScheduleDataset::lookup ─► classify ─► (label, next boundary) ─► Countdown
//! ```
//!
//! Every failure is turned into a label at the [`Resolver`]; nothing panics
//! or escapes to the display layer.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use miqat::{format_countdown, resolve, ScheduleDataset};
//!
//! let dataset = ScheduleDataset::from_json_str(r#"[{
//!     "province": "X", "city": "Y", "date": "05/05/24",
//!     "fajr": "05:00", "sunrise": "06:30", "dhuhr": "12:15",
//!     "asr": "15:45", "maghrib": "18:20", "isha": "19:45"
//! }]"#).unwrap();
//!
//! let now = Utc.with_ymd_and_hms(2024, 5, 5, 13, 0, 0).unwrap();
//! let resolution = resolve(&dataset, "X", "Y", &now);
//!
//! assert_eq!(resolution.label, "Dhuhr");
//! assert_eq!(format_countdown(&now, resolution.next_boundary.as_ref()), "02h 45m 00s");
//! ```

pub(crate) mod boundary;
mod config;
mod countdown;
mod error;
mod host;
mod period;
mod prayer;
mod record;
mod resolve;
mod store;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use boundary::{parse_time_of_day, DayBoundaries, TIME_FORMAT};
pub use config::{Labels, Overnight, ResolverConfig};
pub use countdown::{format_countdown, Countdown};
pub use error::{ConfigError, ScheduleError, UnknownPrayer};
pub use host::{
    Clock, DisplayState, FixedClock, FixedLocality, LocalityProvider, PrayerBoard, SystemClock,
};
pub use period::{classify, classify_within, Classification, PrayerPeriod};
pub use prayer::Prayer;
pub use record::{
    date_key, parse_date_key, Locality, ScheduleRecord, DATE_KEY_FORMAT, UNKNOWN_PLACE,
};
pub use resolve::{resolve, Resolution, ResolutionStatus, Resolver};
pub use store::ScheduleDataset;
