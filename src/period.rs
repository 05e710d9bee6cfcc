// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer periods and classification of an instant.
//!
//! This module provides:
//! - [`PrayerPeriod<Tz>`]: a half-open interval `[start, end)` labelled with
//!   the [`Prayer`] that begins at `start`
//! - [`classify`]: which period an instant falls in, and the next boundary

use std::fmt;

use chrono::{DateTime, TimeZone};
use qtty::{Hour, Hours, Seconds};
use tracing::warn;

use crate::{DayBoundaries, Prayer, ScheduleError, ScheduleRecord};

/// A labelled interval of the day.
///
/// Periods are half-open: an instant equal to `start` belongs to this
/// period, one equal to `end` belongs to the next. `end` is `None` for Isha,
/// which has no upper bound on its own day.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerPeriod<Tz: TimeZone> {
    pub prayer: Prayer,
    pub start: DateTime<Tz>,
    pub end: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> PrayerPeriod<Tz> {
    pub fn new(prayer: Prayer, start: DateTime<Tz>, end: Option<DateTime<Tz>>) -> Self {
        Self { prayer, start, end }
    }

    /// `start <= instant < end`, with an absent `end` treated as unbounded.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        *instant >= self.start && self.end.as_ref().map_or(true, |end| instant < end)
    }

    /// Length of the period, `None` when open-ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use miqat::{Prayer, PrayerPeriod};
    /// use qtty::Hours;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 5, 5, 12, 15, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 5, 5, 15, 45, 0).unwrap();
    /// let dhuhr = PrayerPeriod::new(Prayer::Dhuhr, start, Some(end));
    ///
    /// let hours = dhuhr.duration().unwrap();
    /// assert!((hours - Hours::new(3.5)).abs() < Hours::new(1e-9));
    /// ```
    pub fn duration(&self) -> Option<Hours> {
        self.duration_seconds()
            .map(|seconds| Seconds::new(seconds as f64).to::<Hour>())
    }

    /// Length of the period in whole seconds, `None` when open-ended.
    pub fn duration_seconds(&self) -> Option<i64> {
        self.end
            .as_ref()
            .map(|end| end.clone().signed_duration_since(&self.start).num_seconds())
    }
}

impl<Tz: TimeZone> fmt::Display for PrayerPeriod<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(
                f,
                "{} {} to {}",
                self.prayer,
                self.start.format("%H:%M"),
                end.format("%H:%M")
            ),
            None => write!(f, "{} from {}", self.prayer, self.start.format("%H:%M")),
        }
    }
}

/// Result of classifying an instant against one day's boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<Tz: TimeZone> {
    /// The period `now` falls in.
    pub period: PrayerPeriod<Tz>,
    /// Smallest boundary strictly after `now`; `None` once Isha has begun.
    pub next_boundary: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> Classification<Tz> {
    #[inline]
    pub fn prayer(&self) -> Prayer {
        self.period.prayer
    }
}

/// Picks the period of `boundaries` containing `now`.
///
/// Only the five bounded intervals Fajr…Maghrib are tested; anything outside
/// them is Isha. Before Fajr that is the [pre-dawn](DayBoundaries::pre_dawn)
/// tail of the night, `[day start, fajr)`; otherwise the evening Isha.
pub fn classify_within<Tz: TimeZone>(
    boundaries: &DayBoundaries<Tz>,
    now: &DateTime<Tz>,
) -> Classification<Tz> {
    let period = Prayer::ALL[..Prayer::ALL.len() - 1]
        .iter()
        .map(|p| boundaries.period(*p))
        .find(|period| period.contains(now))
        .unwrap_or_else(|| {
            if now < boundaries.start_of(Prayer::Fajr) {
                boundaries.pre_dawn()
            } else {
                boundaries.period(Prayer::Isha)
            }
        });

    Classification {
        period,
        next_boundary: boundaries.next_after(now).map(|(_, at)| at.clone()),
    }
}

/// Classifies `now` against `record`, placing the record's times on `now`'s
/// calendar day.
///
/// # Errors
/// [`ScheduleError::MalformedTime`] or [`ScheduleError::UnrepresentableTime`]
/// if the record cannot be turned into boundaries.
pub fn classify<Tz: TimeZone>(
    record: &ScheduleRecord,
    now: &DateTime<Tz>,
) -> Result<Classification<Tz>, ScheduleError> {
    let boundaries = DayBoundaries::for_day_of(record, now).inspect_err(|err| {
        warn!(
            "Invalid schedule for {}/{} on {}: {}",
            record.region, record.city, record.date, err
        )
    })?;
    Ok(classify_within(&boundaries, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, NaiveDate};

    fn record() -> ScheduleRecord {
        ScheduleRecord {
            region: "X".into(),
            city: "Y".into(),
            date: "05/05/24".into(),
            fajr: "05:00".into(),
            sunrise: "06:30".into(),
            dhuhr: "12:15".into(),
            asr: "15:45".into(),
            maghrib: "18:20".into(),
            isha: "19:45".into(),
        }
    }

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(-5 * 3600).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        zone().with_ymd_and_hms(2024, 5, 5, h, m, s).unwrap()
    }

    #[test]
    fn sample_afternoon_is_dhuhr() {
        let c = classify(&record(), &at(13, 0, 0)).unwrap();
        assert_eq!(c.prayer(), Prayer::Dhuhr);
        assert_eq!(c.next_boundary, Some(at(15, 45, 0)));
        assert_eq!(c.period.start, at(12, 15, 0));
        assert_eq!(c.period.end, Some(at(15, 45, 0)));
    }

    #[test]
    fn boundary_belongs_to_the_period_it_starts() {
        let expected = [
            ((5, 0), Prayer::Fajr),
            ((6, 30), Prayer::Sunrise),
            ((12, 15), Prayer::Dhuhr),
            ((15, 45), Prayer::Asr),
            ((18, 20), Prayer::Maghrib),
            ((19, 45), Prayer::Isha),
        ];
        for ((h, m), prayer) in expected {
            let c = classify(&record(), &at(h, m, 0)).unwrap();
            assert_eq!(c.prayer(), prayer, "at {h:02}:{m:02}");

            let just_before = at(h, m, 0) - Duration::seconds(1);
            let c = classify(&record(), &just_before).unwrap();
            assert_ne!(c.prayer(), prayer, "just before {h:02}:{m:02}");
            assert_eq!(c.next_boundary, Some(at(h, m, 0)));
        }
    }

    #[test]
    fn labels_are_visited_once_in_order() {
        let mut visited: Vec<Prayer> = Vec::new();
        let mut now = at(5, 0, 0);
        let end = at(19, 45, 0);
        while now <= end {
            let prayer = classify(&record(), &now).unwrap().prayer();
            if visited.last() != Some(&prayer) {
                visited.push(prayer);
            }
            now += Duration::minutes(5);
        }
        assert_eq!(visited, Prayer::ALL.to_vec());
    }

    #[test]
    fn every_instant_gets_a_containing_period() {
        let mut now = at(0, 0, 0);
        let midnight = now + Duration::days(1);
        while now < midnight {
            let c = classify(&record(), &now).unwrap();
            assert!(c.period.contains(&now), "{} should contain {now}", c.period);
            now += Duration::minutes(7);
        }
    }

    #[test]
    fn after_isha_has_no_boundary_today() {
        let c = classify(&record(), &at(22, 0, 0)).unwrap();
        assert_eq!(c.prayer(), Prayer::Isha);
        assert_eq!(c.next_boundary, None);
    }

    #[test]
    fn before_fajr_is_isha_with_fajr_next() {
        let c = classify(&record(), &at(2, 30, 0)).unwrap();
        assert_eq!(c.prayer(), Prayer::Isha);
        assert_eq!(c.next_boundary, Some(at(5, 0, 0)));
        assert!(c.period.contains(&at(2, 30, 0)));
        assert_eq!(c.period.start, at(0, 0, 0));
        assert_eq!(c.period.end, Some(at(5, 0, 0)));
        assert_eq!(c.period.to_string(), "Isha 00:00 to 05:00");
    }

    #[test]
    fn seconds_are_compared_not_dropped() {
        let c = classify(&record(), &at(12, 14, 59)).unwrap();
        assert_eq!(c.prayer(), Prayer::Sunrise);
        let c = classify(&record(), &at(12, 15, 1)).unwrap();
        assert_eq!(c.prayer(), Prayer::Dhuhr);
    }

    #[test]
    fn times_follow_the_instant_not_the_record_date() {
        let other_day = zone().with_ymd_and_hms(2031, 2, 3, 16, 0, 0).unwrap();
        let c = classify(&record(), &other_day).unwrap();
        assert_eq!(c.prayer(), Prayer::Asr);
        assert_eq!(
            c.next_boundary.map(|b| b.date_naive()),
            NaiveDate::from_ymd_opt(2031, 2, 3)
        );
    }

    #[test]
    fn malformed_record_is_an_error() {
        let mut r = record();
        r.maghrib = "sunset".into();
        let err = classify(&r, &at(13, 0, 0)).unwrap_err();
        assert!(err.is_invalid_schedule());
    }

    #[test]
    fn period_duration() {
        let c = classify(&record(), &at(13, 0, 0)).unwrap();
        assert_eq!(c.period.duration_seconds(), Some(3 * 3600 + 30 * 60));

        let isha = classify(&record(), &at(21, 0, 0)).unwrap();
        assert_eq!(isha.period.duration(), None);
        assert_eq!(isha.period.to_string(), "Isha from 19:45");
    }
}
