// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The six daily periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownPrayer;

/// One of the six named periods of a day, in canonical order.
///
/// The derived ordering follows the day: `Fajr < Sunrise < … < Isha`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All periods in the order their boundaries occur.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Display name, also used as the resolved label.
    pub const fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    /// Position in [`Prayer::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The period that follows on the same day, `None` after Isha.
    pub const fn next(self) -> Option<Prayer> {
        match self {
            Prayer::Fajr => Some(Prayer::Sunrise),
            Prayer::Sunrise => Some(Prayer::Dhuhr),
            Prayer::Dhuhr => Some(Prayer::Asr),
            Prayer::Asr => Some(Prayer::Maghrib),
            Prayer::Maghrib => Some(Prayer::Isha),
            Prayer::Isha => None,
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = UnknownPrayer;

    /// Case-insensitive; accepts the record field names (`"dhuhr"`) as well
    /// as display names (`"Dhuhr"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prayer::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPrayer(s.to_string()))
    }
}
