use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "motion.toml";
const MIN_RATE_HZ: f64 = 1.0 / 60.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("{path}: `{key}` must be a finite rate of at least one tick per minute, got {value}")]
    Invalid {
        path: String,
        key: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Motion".into(),
            width: 390.0,
            height: 844.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub enabled: bool,
    pub rate_hz: f64,
    /// Peak tilt in radians produced by the simulated sensor.
    pub amplitude: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_hz: 60.0,
            amplitude: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
}

/// Desktop shell settings. Particle behaviour is fixed and not configurable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub log_filter: String,
    pub frame_rate_hz: f64,
    pub window: WindowConfig,
    pub sensor: SensorConfig,
    pub haptics: HapticsConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            frame_rate_hz: 60.0,
            window: WindowConfig::default(),
            sensor: SensorConfig::default(),
            haptics: HapticsConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_toml_str(path: &str, text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Rates must be finite and at least one tick per minute.
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let rates = [
            ("frame_rate_hz", self.frame_rate_hz),
            ("sensor.rate_hz", self.sensor.rate_hz),
        ];
        for (key, value) in rates {
            if !value.is_finite() || value < MIN_RATE_HZ {
                return Err(ConfigError::Invalid {
                    path: path.to_string(),
                    key,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&shown, &text)?;
        info!("loaded configuration from {}", shown);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = MotionConfig::from_toml_str("test", "").unwrap();
        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let text = r#"
            frame_rate_hz = 120.0

            [sensor]
            amplitude = 0.5

            [haptics]
            enabled = true
        "#;
        let config = MotionConfig::from_toml_str("test", text).unwrap();
        assert_eq!(config.frame_rate_hz, 120.0);
        assert_eq!(config.sensor.amplitude, 0.5);
        assert!(config.sensor.enabled);
        assert!(config.haptics.enabled);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let err = MotionConfig::from_toml_str("motion.toml", "frame_rate_hz = [").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse motion.toml"));
    }

    #[test]
    fn degenerate_rates_are_rejected() {
        for text in [
            "frame_rate_hz = 1e-20",
            "frame_rate_hz = inf",
            "frame_rate_hz = nan",
            "frame_rate_hz = 0.0",
            "[sensor]\nrate_hz = inf",
            "[sensor]\nrate_hz = -5.0",
        ] {
            let result = MotionConfig::from_toml_str("motion.toml", text);
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn invalid_rate_names_the_key() {
        let err =
            MotionConfig::from_toml_str("motion.toml", "[sensor]\nrate_hz = nan").unwrap_err();
        assert!(err.to_string().contains("sensor.rate_hz"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/motion.toml");
        assert_eq!(
            MotionConfig::load_or_default(path).unwrap(),
            MotionConfig::default()
        );
    }
}
