//! Gallery view configuration.
//!
//! Defaults match the reference styling: 16:9 tiles, 5px margins, 55px of
//! control chrome, and a 250ms trailing debounce on resize. Hosts can
//! override any of them through environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default tile aspect ratio when cropping is off.
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Default outer and per-tile margin in pixels.
pub const DEFAULT_TILE_MARGIN: f64 = 5.0;

/// Default height reserved for on-screen controls, in pixels.
pub const DEFAULT_CHROME_HEIGHT: f64 = 55.0;

/// Default trailing debounce window for resize triggers, in milliseconds.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Default view actor mailbox depth.
pub const DEFAULT_MAILBOX_BUFFER: usize = 64;

/// Gallery view configuration.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Tile aspect ratio used in uncropped mode.
    pub aspect_ratio: f64,

    /// Margin in pixels, applied both around the grid and around each tile.
    pub tile_margin: f64,

    /// Vertical space reserved for the control bar, in pixels.
    pub chrome_height: f64,

    /// Trailing debounce window for container resize triggers.
    pub resize_debounce: Duration,

    /// View actor mailbox depth.
    pub mailbox_buffer: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            tile_margin: DEFAULT_TILE_MARGIN,
            chrome_height: DEFAULT_CHROME_HEIGHT,
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
            mailbox_buffer: DEFAULT_MAILBOX_BUFFER,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {variable}: {value}")]
    InvalidValue { variable: String, value: String },
}

impl ViewConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: `GV_ASPECT_RATIO`, `GV_TILE_MARGIN`,
    /// `GV_CHROME_HEIGHT`, `GV_RESIZE_DEBOUNCE_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("GV_ASPECT_RATIO") {
            config.aspect_ratio = parse_positive_f64("GV_ASPECT_RATIO", &value)?;
        }
        if let Ok(value) = env::var("GV_TILE_MARGIN") {
            config.tile_margin = parse_non_negative_f64("GV_TILE_MARGIN", &value)?;
        }
        if let Ok(value) = env::var("GV_CHROME_HEIGHT") {
            config.chrome_height = parse_non_negative_f64("GV_CHROME_HEIGHT", &value)?;
        }
        if let Ok(value) = env::var("GV_RESIZE_DEBOUNCE_MS") {
            let millis = value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    variable: "GV_RESIZE_DEBOUNCE_MS".to_string(),
                    value,
                })?;
            config.resize_debounce = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn parse_positive_f64(variable: &str, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed > 0.0 && parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            variable: variable.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_non_negative_f64(variable: &str, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed >= 0.0 && parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::InvalidValue {
            variable: variable.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ViewConfig::default();
        assert!((config.aspect_ratio - 16.0 / 9.0).abs() < f64::EPSILON);
        assert!((config.tile_margin - 5.0).abs() < f64::EPSILON);
        assert!((config.chrome_height - 55.0).abs() < f64::EPSILON);
        assert_eq!(config.resize_debounce, Duration::from_millis(250));
        assert_eq!(config.mailbox_buffer, 64);
    }

    #[test]
    fn test_parse_positive_rejects_zero_and_garbage() {
        assert!(parse_positive_f64("GV_ASPECT_RATIO", "0").is_err());
        assert!(parse_positive_f64("GV_ASPECT_RATIO", "-1.5").is_err());
        assert!(parse_positive_f64("GV_ASPECT_RATIO", "wide").is_err());
        assert!(parse_positive_f64("GV_ASPECT_RATIO", "inf").is_err());
        assert!((parse_positive_f64("GV_ASPECT_RATIO", "1.5").unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_non_negative_accepts_zero() {
        assert!((parse_non_negative_f64("GV_TILE_MARGIN", "0").unwrap()).abs() < f64::EPSILON);
        assert!(parse_non_negative_f64("GV_TILE_MARGIN", "-0.1").is_err());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            variable: "GV_CHROME_HEIGHT".to_string(),
            value: "tall".to_string(),
        };
        assert_eq!(format!("{err}"), "Invalid value for GV_CHROME_HEIGHT: tall");
    }
}
