//! Widget configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the widget core, loadable from a TOML snippet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Grace period in milliseconds between the input losing focus and the
    /// suggestion list hiding, so a click on a suggestion can land first.
    pub hide_delay_ms: u64,
    /// Maximum number of decimal places in a displayed result.
    pub display_precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_delay_ms: 1000,
            display_precision: 10,
        }
    }
}

impl Config {
    /// Parse a config from TOML; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("failed to parse widget config")
    }

    /// The hide grace period as a `Duration`.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}
