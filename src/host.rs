// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Host-side collaborators.
//!
//! The resolver knows nothing about clocks or location services. A host
//! supplies both through [`Clock`] and [`LocalityProvider`], and a
//! [`PrayerBoard`] turns them into the two strings a display needs on every
//! tick.

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::{Countdown, Locality, Resolver};

/// Source of the current locality, e.g. a reverse-geocoding service.
pub trait LocalityProvider {
    /// The current locality, or `None` while no fix is available.
    fn locality(&self) -> Option<Locality>;
}

/// A provider that always reports the same answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedLocality(pub Option<Locality>);

impl FixedLocality {
    pub fn new(region: impl Into<String>, city: impl Into<String>) -> Self {
        Self(Some(Locality::new(region, city)))
    }

    /// A provider that never obtains a fix.
    pub fn none() -> Self {
        Self(None)
    }
}

impl LocalityProvider for FixedLocality {
    fn locality(&self) -> Option<Locality> {
        self.0.clone()
    }
}

impl<F> LocalityProvider for F
where
    F: Fn() -> Option<Locality>,
{
    fn locality(&self) -> Option<Locality> {
        self()
    }
}

/// Source of "now".
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// The host's wall clock in its local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}

/// What a display shows after one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState<Tz: TimeZone> {
    pub label: String,
    pub countdown: String,
    /// Boundary the countdown runs to, for hosts that re-render the countdown
    /// between refreshes.
    pub next_boundary: Option<DateTime<Tz>>,
}

/// Resolver plus the host's clock and locality source.
#[derive(Debug, Clone)]
pub struct PrayerBoard<P, C> {
    resolver: Resolver,
    provider: P,
    clock: C,
}

impl<P: LocalityProvider, C: Clock> PrayerBoard<P, C> {
    pub fn new(resolver: Resolver, provider: P, clock: C) -> Self {
        Self {
            resolver,
            provider,
            clock,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Reads the clock and the locality and resolves them.
    ///
    /// Without a locality fix the label is the `loading` sentinel and no
    /// boundary is known.
    pub fn refresh(&self) -> DisplayState<C::Tz> {
        let now = self.clock.now();
        let labels = self.resolver.labels();

        let Some(locality) = self.provider.locality() else {
            debug!("Locality not available yet");
            return DisplayState {
                label: labels.loading.clone(),
                countdown: Countdown::Unknown.render(labels),
                next_boundary: None,
            };
        };

        let resolution = self.resolver.resolve(&locality, &now);
        let countdown = resolution.countdown(&now).render(labels);
        DisplayState {
            label: resolution.label,
            countdown,
            next_boundary: resolution.next_boundary,
        }
    }

    /// Countdown to a boundary computed by an earlier [`refresh`](Self::refresh).
    /// A boundary the clock has since reached renders as the `passed` sentinel.
    pub fn countdown_to<Tz: TimeZone>(&self, next_boundary: Option<&DateTime<Tz>>) -> String {
        Countdown::between(&self.clock.now(), next_boundary).render(self.resolver.labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResolverConfig, ScheduleDataset, ScheduleRecord};
    use chrono::{Duration, Utc};
    use std::cell::Cell;

    fn resolver() -> Resolver {
        let record = ScheduleRecord {
            region: "X".into(),
            city: "Y".into(),
            date: "05/05/24".into(),
            fajr: "05:00".into(),
            sunrise: "06:30".into(),
            dhuhr: "12:15".into(),
            asr: "15:45".into(),
            maghrib: "18:20".into(),
            isha: "19:45".into(),
        };
        Resolver::new(ScheduleDataset::new(vec![record]), ResolverConfig::default())
    }

    fn clock(h: u32, m: u32) -> FixedClock<Utc> {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 5, h, m, 0).unwrap())
    }

    #[test]
    fn refresh_shows_label_and_countdown() {
        let board = PrayerBoard::new(resolver(), FixedLocality::new("X", "Y"), clock(13, 0));
        let state = board.refresh();
        assert_eq!(state.label, "Dhuhr");
        assert_eq!(state.countdown, "02h 45m 00s");
        assert_eq!(
            state.next_boundary,
            Some(Utc.with_ymd_and_hms(2024, 5, 5, 15, 45, 0).unwrap())
        );
    }

    #[test]
    fn no_fix_shows_loading() {
        let board = PrayerBoard::new(resolver(), FixedLocality::none(), clock(13, 0));
        let state = board.refresh();
        assert_eq!(state.label, "Loading...");
        assert_eq!(state.countdown, "Next prayer time unknown");
        assert_eq!(state.next_boundary, None);
    }

    #[test]
    fn unknown_place_is_unavailable_not_loading() {
        let provider = || Some(Locality::unknown());
        let board = PrayerBoard::new(resolver(), provider, clock(13, 0));
        assert_eq!(board.refresh().label, "Error loading prayer times");
    }

    #[test]
    fn closure_provider_is_polled_each_refresh() {
        let calls = Cell::new(0);
        let provider = || {
            calls.set(calls.get() + 1);
            Some(Locality::new("X", "Y"))
        };
        let board = PrayerBoard::new(resolver(), provider, clock(19, 0));
        board.refresh();
        board.refresh();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn stale_boundary_reports_passed() {
        let board = PrayerBoard::new(resolver(), FixedLocality::new("X", "Y"), clock(13, 0));
        let earlier = Utc.with_ymd_and_hms(2024, 5, 5, 13, 0, 0).unwrap() - Duration::minutes(1);
        assert_eq!(board.countdown_to(Some(&earlier)), "Prayer time passed");
        assert_eq!(
            board.countdown_to::<Utc>(None),
            "Next prayer time unknown"
        );
    }

    #[test]
    fn system_clock_is_local() {
        let before = Local::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
