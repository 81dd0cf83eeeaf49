use std::time::Duration;

use thiserror::Error;

use crate::app::confirm::FlashPattern;
use crate::app::strip::TransitionTiming;
use crate::svc::feed::{DEFAULT_FEED_FIELD, DEFAULT_FEED_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("missing Wi-Fi credentials")]
    MissingCredentials,
}

/// Runtime options, read once at startup.
#[derive(Debug, Clone, Eq, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Output identifiers, one strip each. GPIO numbers on the firmware.
    pub pixel_outputs: Vec<u32>,
    pub pixels_per_strip: usize,
    pub poll_interval_seconds: u64,
    pub base_delay_ms: u64,
    pub jitter_bound_ms: u64,
    pub target_hold_ms: u64,
    pub confirm_pulses: u32,
    pub confirm_pulse_ms: u64,
    pub feed_url: String,
    pub feed_field: String,
    pub wifi_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pixel_outputs: vec![0, 14, 12, 13, 15],
            pixels_per_strip: 4,
            poll_interval_seconds: 15,
            base_delay_ms: 25,
            jitter_bound_ms: 25,
            target_hold_ms: 4095,
            confirm_pulses: 3,
            confirm_pulse_ms: 300,
            feed_url: DEFAULT_FEED_URL.to_owned(),
            feed_field: DEFAULT_FEED_FIELD.to_owned(),
            wifi_timeout_seconds: 15,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_outputs.is_empty() {
            return Err(ConfigError::Invalid("pixelOutputs must not be empty"));
        }
        if self.pixels_per_strip == 0 {
            return Err(ConfigError::Invalid("pixelsPerStrip must be positive"));
        }
        if self.poll_interval_seconds == 0 {
            return Err(ConfigError::Invalid("pollIntervalSeconds must be positive"));
        }
        if self.feed_field.is_empty() {
            return Err(ConfigError::Invalid("feedField must not be empty"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn wifi_timeout(&self) -> Duration {
        Duration::from_secs(self.wifi_timeout_seconds)
    }

    pub fn transition_timing(&self) -> TransitionTiming {
        TransitionTiming {
            base_delay: Duration::from_millis(self.base_delay_ms),
            jitter_bound: Duration::from_millis(self.jitter_bound_ms),
            target_hold: Duration::from_millis(self.target_hold_ms),
        }
    }

    pub fn flash_pattern(&self) -> FlashPattern {
        let pulse = Duration::from_millis(self.confirm_pulse_ms);
        FlashPattern {
            pulses: self.confirm_pulses,
            on: pulse,
            off: pulse,
        }
    }
}
