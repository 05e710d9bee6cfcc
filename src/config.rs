// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Resolver configuration.
//!
//! Every field is optional; an empty file yields [`ResolverConfig::default`].
//!
//! ```toml
//! dataset = "data/prayer_times.json"
//! overnight = "next-fajr"
//!
//! [labels]
//! unavailable = "No schedule for this place"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ConfigError;

/// What the resolver reports as the next boundary once Isha has begun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overnight {
    /// No boundary until the day changes.
    #[default]
    SameDay,
    /// The next calendar day's Fajr, if the dataset has a record for it.
    NextFajr,
}

/// Display texts for states that are not a prayer name or a countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Shown before the host has a locality fix.
    pub loading: String,
    /// No record for today at this locality, or the dataset failed to load.
    pub unavailable: String,
    /// The record for today has a malformed time.
    pub invalid: String,
    /// No boundary left to count down to.
    pub unknown_boundary: String,
    /// The cached boundary is already behind the clock.
    pub passed: String,
}

impl Labels {
    pub const DEFAULT_LOADING: &'static str = "Loading...";
    pub const DEFAULT_UNAVAILABLE: &'static str = "Error loading prayer times";
    pub const DEFAULT_INVALID: &'static str = "Invalid prayer times";
    pub const DEFAULT_UNKNOWN_BOUNDARY: &'static str = "Next prayer time unknown";
    pub const DEFAULT_PASSED: &'static str = "Prayer time passed";
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            loading: Self::DEFAULT_LOADING.to_string(),
            unavailable: Self::DEFAULT_UNAVAILABLE.to_string(),
            invalid: Self::DEFAULT_INVALID.to_string(),
            unknown_boundary: Self::DEFAULT_UNKNOWN_BOUNDARY.to_string(),
            passed: Self::DEFAULT_PASSED.to_string(),
        }
    }
}

/// Settings for [`Resolver`](crate::Resolver) and the host layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Dataset file for hosts that load it themselves.
    pub dataset: Option<PathBuf>,
    pub overnight: Overnight,
    pub labels: Labels,
}

impl ResolverConfig {
    /// Reads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(
            "Loaded resolver configuration from {} (overnight: {:?})",
            path.display(),
            config.overnight
        );
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }
}
