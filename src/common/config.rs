//! # Configuration
//!
//! TOML-backed tuning knobs. Every field has a default that reproduces the
//! stock behavior, so an empty file (or no file at all) is a valid
//! configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Tuning knobs for a sync session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Blend coefficient applied per received update when moving a remote
    /// proxy toward its latest reported position (0.0 = frozen, 1.0 = snap)
    #[serde(default = "default_lerp_factor")]
    pub lerp_factor: f32,

    /// How often the UI re-checks for the local peer id before it is shown
    #[serde(default = "default_id_poll_interval_secs")]
    pub id_poll_interval_secs: u64,

    /// Pacing of the outgoing pose broadcast in the demo binary
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_lerp_factor() -> f32 {
    0.3
}

fn default_id_poll_interval_secs() -> u64 {
    1
}

fn default_tick_interval_ms() -> u64 {
    100
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lerp_factor: default_lerp_factor(),
            id_poll_interval_secs: default_id_poll_interval_secs(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// - `path`: Path to the TOML configuration file
    ///
    /// # Example
    /// ```ignore
    /// let config = SyncConfig::from_file("config/sync.toml")?;
    /// ```
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SyncConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
