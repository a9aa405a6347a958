// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Player configuration
//!
//! Durations are written humantime-style in TOML ("16ms", "1s").

use crate::error::PlayerError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Driver timing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    /// Interval between qualifying sequence ticks
    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    pub tick_interval: Duration,
    /// Native frame period for the timer frame source
    #[serde(with = "humantime_serde", default = "default_frame_period")]
    pub frame_period: Duration,
    /// Fallback timeout for preload batches that set none
    #[serde(with = "humantime_serde", default)]
    pub preload_timeout: Option<Duration>,
}

fn default_tick_interval() -> Duration {
    reel_core::DEFAULT_INTERVAL
}

fn default_frame_period() -> Duration {
    reel_core::DEFAULT_INTERVAL
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            frame_period: default_frame_period(),
            preload_timeout: None,
        }
    }
}

impl PlayerConfig {
    /// Load configuration from a TOML file
    pub fn from_path(path: &Path) -> Result<Self, PlayerError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlayerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| PlayerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
