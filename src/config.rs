//! Runtime settings for the sampling window.
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `BROKERWATCH_`-prefixed environment variables. CLI flags are
//! applied on top by the caller.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;

/// Sampling settings as written in a config file: durations are strings
/// like "5s" or "10m".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sampling cadence.
    pub tick: String,
    /// Retention horizon.
    pub horizon: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick: "5s".to_string(),
            horizon: "10m".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional config file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("BROKERWATCH"))
            .build()
            .context("failed to load configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration values")
    }

    pub fn tick(&self) -> Result<Duration> {
        parse_duration(&self.tick).context("invalid tick cadence")
    }

    pub fn horizon(&self) -> Result<Duration> {
        parse_duration(&self.horizon).context("invalid retention horizon")
    }
}
