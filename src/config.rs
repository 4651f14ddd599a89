//! Operator configuration
//!
//! Defaults reproduce the stock operator: one channel at 120 Hz named
//! `chan1`, `Speed` and `Scale` at 1.0 on a [-10, 10] slider, `Sine` selected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChopError;
use crate::generator::Shape;

/// Default value and slider range of a float parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub const fn new(default: f64, min: f64, max: f64) -> Self {
        Self { default, min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChopConfig {
    /// Channels declared when no input is connected
    pub num_channels: usize,
    /// Sample rate declared when no input is connected, in Hz
    pub sample_rate: f64,
    /// Channel `i` is named `{channel_prefix}{i + 1}`
    pub channel_prefix: String,
    pub speed: FloatRange,
    pub scale: FloatRange,
    pub shape: Shape,
}

impl Default for ChopConfig {
    fn default() -> Self {
        Self {
            num_channels: 1,
            sample_rate: 120.0,
            channel_prefix: "chan".to_string(),
            speed: FloatRange::new(1.0, -10.0, 10.0),
            scale: FloatRange::new(1.0, -10.0, 10.0),
            shape: Shape::Sine,
        }
    }
}

impl ChopConfig {
    /// Load a JSON config; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChopError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ChopError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn channel_name(&self, index: usize) -> String {
        format!("{}{}", self.channel_prefix, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChopConfig::default();
        assert_eq!(config.num_channels, 1);
        assert_eq!(config.sample_rate, 120.0);
        assert_eq!(config.channel_name(0), "chan1");
        assert_eq!(config.speed, FloatRange::new(1.0, -10.0, 10.0));
        assert_eq!(config.shape, Shape::Sine);
    }

    #[test]
    fn test_partial_json() {
        let config = ChopConfig::from_json(r#"{ "num_channels": 3, "shape": "Ramp" }"#).unwrap();
        assert_eq!(config.num_channels, 3);
        assert_eq!(config.shape, Shape::Ramp);
        assert_eq!(config.sample_rate, 120.0);
        assert_eq!(config.channel_name(2), "chan3");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ChopConfig::from_json("{ \"num_channels\": \"two\" }"),
            Err(ChopError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("wave_chop_missing_config.json");
        assert!(matches!(ChopConfig::load(&path), Err(ChopError::Io(_))));
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join("wave_chop_config_test.json");
        let config = ChopConfig {
            sample_rate: 240.0,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(ChopConfig::load(&path).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }
}
