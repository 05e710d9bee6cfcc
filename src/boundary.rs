// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Period boundaries.
//!
//! A record stores six wall-clock `HH:mm` strings. [`DayBoundaries`] turns
//! them into six instants on a concrete calendar date in the host time zone,
//! so DST and offset rules come from the zone itself.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::{Prayer, PrayerPeriod, ScheduleError, ScheduleRecord};

/// `chrono` format of a record time field.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a record time field (`HH:mm`, 24-hour) into a time of day with
/// zero seconds.
pub fn parse_time_of_day(prayer: Prayer, value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        ScheduleError::MalformedTime {
            prayer,
            value: value.to_string(),
        }
    })
}

/// Places `time` on `date` in zone `tz`.
///
/// Ambiguous local times (clocks going back) resolve to the earlier instant.
pub(crate) fn local_instant<Tz: TimeZone>(
    tz: &Tz,
    prayer: Prayer,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<DateTime<Tz>, ScheduleError> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(instant) => Ok(instant),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ScheduleError::UnrepresentableTime { prayer, date, time }),
    }
}

/// First instant of `date` in zone `tz`.
///
/// Usually local midnight. Where a transition skips midnight, the first
/// wall-clock quarter hour that exists is used instead.
fn first_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..24 * 4)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
}

/// The six boundary instants of one day, indexed by [`Prayer`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayBoundaries<Tz: TimeZone> {
    day_start: DateTime<Tz>,
    starts: [DateTime<Tz>; 6],
}

impl<Tz: TimeZone> DayBoundaries<Tz> {
    /// Combines every time field of `record` with `date` in zone `tz`.
    ///
    /// The record's own date string is not consulted: the caller decides
    /// which day the times belong to.
    ///
    /// # Errors
    /// [`ScheduleError::MalformedTime`] for the first field that is not
    /// `HH:mm`; [`ScheduleError::UnrepresentableTime`] if a time falls in a
    /// DST gap.
    pub fn on(record: &ScheduleRecord, date: NaiveDate, tz: &Tz) -> Result<Self, ScheduleError> {
        let mut times = [NaiveTime::MIN; 6];
        for prayer in Prayer::ALL {
            times[prayer.index()] = parse_time_of_day(prayer, record.time_of(prayer))?;
        }

        let instant = |prayer: Prayer| local_instant(tz, prayer, date, times[prayer.index()]);
        let fajr = instant(Prayer::Fajr)?;
        Ok(Self {
            day_start: first_instant(tz, date).unwrap_or_else(|| fajr.clone()),
            starts: [
                fajr,
                instant(Prayer::Sunrise)?,
                instant(Prayer::Dhuhr)?,
                instant(Prayer::Asr)?,
                instant(Prayer::Maghrib)?,
                instant(Prayer::Isha)?,
            ],
        })
    }

    /// Boundaries of `record` on the calendar day of `now`.
    pub fn for_day_of(record: &ScheduleRecord, now: &DateTime<Tz>) -> Result<Self, ScheduleError> {
        Self::on(record, now.date_naive(), &now.timezone())
    }

    /// First instant of the calendar day, normally local midnight.
    #[inline]
    pub fn day_start(&self) -> &DateTime<Tz> {
        &self.day_start
    }

    /// Instant at which `prayer` begins.
    #[inline]
    pub fn start_of(&self, prayer: Prayer) -> &DateTime<Tz> {
        &self.starts[prayer.index()]
    }

    /// Instant at which `prayer` ends on the same day; `None` for Isha.
    pub fn end_of(&self, prayer: Prayer) -> Option<&DateTime<Tz>> {
        prayer.next().map(|next| self.start_of(next))
    }

    /// The period that begins with `prayer`.
    pub fn period(&self, prayer: Prayer) -> PrayerPeriod<Tz> {
        PrayerPeriod::new(
            prayer,
            self.start_of(prayer).clone(),
            self.end_of(prayer).cloned(),
        )
    }

    /// The tail of the previous night's Isha, `[day start, fajr)`.
    pub fn pre_dawn(&self) -> PrayerPeriod<Tz> {
        PrayerPeriod::new(
            Prayer::Isha,
            self.day_start.clone(),
            Some(self.start_of(Prayer::Fajr).clone()),
        )
    }

    /// All six periods in order; the last one (Isha) is open-ended.
    pub fn periods(&self) -> Vec<PrayerPeriod<Tz>> {
        Prayer::ALL.iter().map(|p| self.period(*p)).collect()
    }

    /// Smallest boundary strictly after `now`, `None` once Isha has begun.
    pub fn next_after(&self, now: &DateTime<Tz>) -> Option<(Prayer, &DateTime<Tz>)> {
        Prayer::ALL
            .iter()
            .map(|p| (*p, self.start_of(*p)))
            .filter(|(_, start)| *start > now)
            .min_by(|a, b| a.1.cmp(b.1))
    }

    /// `true` when the boundaries are strictly increasing in canonical order.
    pub fn is_ordered(&self) -> bool {
        self.starts.windows(2).all(|pair| pair[0] < pair[1])
    }
}
