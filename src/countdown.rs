// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Countdown to the next boundary.

use std::fmt;

use chrono::{DateTime, TimeZone};
use qtty::Seconds;

use crate::Labels;

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Time left until the next boundary, or why there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Whole hours, minutes (0–59) and seconds (0–59) remaining.
    Remaining { hours: i64, minutes: u8, seconds: u8 },
    /// No boundary remains today.
    Unknown,
    /// The boundary is now or already behind us.
    Passed,
}

impl Countdown {
    /// Counts down from `now` to `next`.
    ///
    /// Sub-second remainders are truncated. A boundary equal to `now` is
    /// [`Countdown::Passed`], never a zero countdown.
    pub fn between<Tz: TimeZone, Tz2: TimeZone>(
        now: &DateTime<Tz>,
        next: Option<&DateTime<Tz2>>,
    ) -> Self {
        let Some(next) = next else {
            return Countdown::Unknown;
        };
        if *now >= *next {
            return Countdown::Passed;
        }
        let total = next.clone().signed_duration_since(now).num_seconds();
        Countdown::from_seconds(total)
    }

    /// Splits a positive number of seconds into hours, minutes and seconds.
    fn from_seconds(total: i64) -> Self {
        Countdown::Remaining {
            hours: total / SECONDS_PER_HOUR,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Remaining time as a quantity, `None` for the sentinel states.
    pub fn remaining(&self) -> Option<Seconds> {
        match *self {
            Countdown::Remaining {
                hours,
                minutes,
                seconds,
            } => {
                let total =
                    hours * SECONDS_PER_HOUR + minutes as i64 * SECONDS_PER_MINUTE + seconds as i64;
                Some(Seconds::new(total as f64))
            }
            Countdown::Unknown | Countdown::Passed => None,
        }
    }

    /// Renders the countdown, taking sentinel texts from `labels`.
    pub fn render(&self, labels: &Labels) -> String {
        match self {
            Countdown::Remaining { .. } => self.to_string(),
            Countdown::Unknown => labels.unknown_boundary.clone(),
            Countdown::Passed => labels.passed.clone(),
        }
    }
}

impl fmt::Display for Countdown {
    /// `HHh MMm SSs`, hours widening past two digits when needed. Sentinel
    /// states use the default [`Labels`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining {
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}h {minutes:02}m {seconds:02}s"),
            Countdown::Unknown => f.write_str(Labels::DEFAULT_UNKNOWN_BOUNDARY),
            Countdown::Passed => f.write_str(Labels::DEFAULT_PASSED),
        }
    }
}

/// Display string for the time between `now` and `next`, using the default
/// sentinel labels.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use miqat::format_countdown;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 5, 13, 0, 0).unwrap();
/// let asr = Utc.with_ymd_and_hms(2024, 5, 5, 15, 45, 0).unwrap();
/// assert_eq!(format_countdown(&now, Some(&asr)), "02h 45m 00s");
/// ```
pub fn format_countdown<Tz: TimeZone, Tz2: TimeZone>(
    now: &DateTime<Tz>,
    next: Option<&DateTime<Tz2>>,
) -> String {
    Countdown::between(now, next).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn two_three_four() {
        let next = now() + Duration::seconds(2 * 3600 + 3 * 60 + 4);
        assert_eq!(format_countdown(&now(), Some(&next)), "02h 03m 04s");
    }

    #[test]
    fn equal_instants_have_passed() {
        assert_eq!(Countdown::between(&now(), Some(&now())), Countdown::Passed);
        assert_eq!(format_countdown(&now(), Some(&now())), "Prayer time passed");
    }

    #[test]
    fn stale_boundary_has_passed() {
        let stale = now() - Duration::minutes(1);
        assert_eq!(Countdown::between(&now(), Some(&stale)), Countdown::Passed);
    }

    #[test]
    fn absent_boundary_is_unknown() {
        assert_eq!(
            format_countdown::<Utc, Utc>(&now(), None),
            "Next prayer time unknown"
        );
    }

    #[test]
    fn sub_second_remainder_is_truncated() {
        let next = now() + Duration::milliseconds(61_999);
        assert_eq!(format_countdown(&now(), Some(&next)), "00h 01m 01s");

        let next = now() + Duration::milliseconds(400);
        assert_eq!(format_countdown(&now(), Some(&next)), "00h 00m 00s");
    }

    #[test]
    fn hours_widen_past_two_digits() {
        let next = now() + Duration::hours(123) + Duration::seconds(5);
        assert_eq!(format_countdown(&now(), Some(&next)), "123h 00m 05s");
    }

    #[test]
    fn mixed_zones_compare_absolute_instants() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let next = tz.with_ymd_and_hms(2024, 5, 5, 13, 30, 0).unwrap();
        assert_eq!(format_countdown(&now(), Some(&next)), "01h 30m 00s");
    }

    #[test]
    fn remaining_quantity() {
        let next = now() + Duration::seconds(90);
        let c = Countdown::between(&now(), Some(&next));
        assert_eq!(c.remaining(), Some(Seconds::new(90.0)));
        assert_eq!(Countdown::Passed.remaining(), None);
    }

    #[test]
    fn render_uses_custom_labels() {
        let labels = Labels {
            passed: "late".into(),
            unknown_boundary: "?".into(),
            ..Labels::default()
        };
        assert_eq!(Countdown::Passed.render(&labels), "late");
        assert_eq!(Countdown::Unknown.render(&labels), "?");
        assert_eq!(
            Countdown::from_seconds(59).render(&labels),
            "00h 00m 59s"
        );
    }
}
