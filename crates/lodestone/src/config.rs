//! Session configuration.
//!
//! Loaded once at startup from a TOML file; every field has a default
//! taken from the shared protocol constants, so a partial (or absent)
//! file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lodestone_core::GestureConfig;
use lodestone_shared::{
    DEFAULT_MARKER_SCALE, EVENT_CHANNEL_CAPACITY, PINCH_SCALE_FACTOR, ROTATE_SPEED_MODIFIER,
    SYNC_CHANNEL_CAPACITY, TAP_SLOP, TICK_RATE,
};

/// Errors from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tuning for one session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation tick rate in Hz.
    pub tick_rate: u32,
    /// Degrees of yaw per screen unit of horizontal drag.
    pub rotate_speed_modifier: f32,
    /// Multiplier applied to the pinch distance difference.
    pub pinch_scale_factor: f32,
    /// Maximum movement that still counts as a tap, in screen units.
    pub tap_slop: f32,
    /// Uniform scale given to newly-detected markers.
    pub default_marker_scale: f32,
    /// Capacity of replication request/update channels.
    pub sync_channel_capacity: usize,
    /// Capacity of the diagnostic event bus.
    pub event_channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            rotate_speed_modifier: ROTATE_SPEED_MODIFIER,
            pinch_scale_factor: PINCH_SCALE_FACTOR,
            tap_slop: TAP_SLOP,
            default_marker_scale: DEFAULT_MARKER_SCALE,
            sync_channel_capacity: SYNC_CHANNEL_CAPACITY,
            event_channel_capacity: EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML
    /// for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The gesture-interpreter slice of this configuration.
    #[must_use]
    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            rotate_speed_modifier: self.rotate_speed_modifier,
            pinch_scale_factor: self.pinch_scale_factor,
            tap_slop: self.tap_slop,
        }
    }
}
