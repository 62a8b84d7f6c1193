use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const SPIN_DURATION_RANGE_MS: RangeInclusive<u64> = 2_000..=10_000;
pub const SPIN_DURATION_STEP_MS: u64 = 500;
pub const WHEEL_SIZE_RANGE: RangeInclusive<f32> = 300.0..=700.0;
pub const WHEEL_SIZE_STEP: f32 = 50.0;

/// User-tunable wheel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct WheelConfig {
    /// Length of a spin animation in milliseconds
    pub spin_duration_ms: u64,
    /// Wheel diameter in pixels
    pub wheel_size: f32,
    /// Whether tick and winner sounds play
    pub sound_enabled: bool,
    pub dark_mode: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 5_000,
            wheel_size: 500.0,
            sound_enabled: true,
            dark_mode: false,
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin_duration_ms == 0 {
            return Err(ConfigError::ZeroSpinDuration);
        }
        if !self.wheel_size.is_finite() || self.wheel_size <= 0.0 {
            return Err(ConfigError::InvalidWheelSize(self.wheel_size));
        }
        Ok(())
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// Pulls values into the ranges offered by the settings panel
    pub fn clamp_to_ui_ranges(&mut self) {
        self.spin_duration_ms = self
            .spin_duration_ms
            .clamp(*SPIN_DURATION_RANGE_MS.start(), *SPIN_DURATION_RANGE_MS.end());
        if !self.wheel_size.is_finite() {
            self.wheel_size = Self::default().wheel_size;
        }
        self.wheel_size = self
            .wheel_size
            .clamp(*WHEEL_SIZE_RANGE.start(), *WHEEL_SIZE_RANGE.end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(WheelConfig::default().validate(), Ok(()));
        assert_eq!(WheelConfig::default().spin_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = WheelConfig {
            spin_duration_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpinDuration));

        let config = WheelConfig {
            wheel_size: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWheelSize(-1.0)));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: WheelConfig = serde_json::from_str(r#"{"wheel_size": 640.0}"#).unwrap();
        assert_eq!(config.wheel_size, 640.0);
        assert_eq!(config.spin_duration_ms, 5_000);
        assert!(config.sound_enabled);
    }

    #[test]
    fn test_clamp_to_ui_ranges() {
        let mut config = WheelConfig {
            spin_duration_ms: 60_000,
            wheel_size: f32::NAN,
            ..Default::default()
        };
        config.clamp_to_ui_ranges();
        assert_eq!(config.spin_duration_ms, 10_000);
        assert_eq!(config.wheel_size, 500.0);

        let mut config = WheelConfig {
            spin_duration_ms: 1_000,
            wheel_size: 800.0,
            ..Default::default()
        };
        config.clamp_to_ui_ranges();
        assert_eq!(config.spin_duration_ms, 2_000);
        assert_eq!(config.wheel_size, 700.0);
    }

    #[test]
    fn test_defaults_sit_on_slider_steps() {
        let config = WheelConfig::default();
        assert!(SPIN_DURATION_RANGE_MS.contains(&config.spin_duration_ms));
        assert_eq!(config.spin_duration_ms % SPIN_DURATION_STEP_MS, 0);
        assert!(WHEEL_SIZE_RANGE.contains(&config.wheel_size));
        assert_eq!(config.wheel_size % WHEEL_SIZE_STEP, 0.0);
    }
}
