//! Gallery view error types.
//!
//! No condition in the view core is fatal: every failure degrades to
//! skipping one recomputation or keeping the last known good state.

use thiserror::Error;

use crate::config::ConfigError;

/// Gallery view error type.
#[derive(Debug, Error)]
pub enum ViewError {
    /// An engine command was rejected or the engine is unavailable.
    #[error("Engine command failed: {0}")]
    Engine(String),

    /// The view actor has shut down and can no longer be reached.
    #[error("View detached: {0}")]
    Detached(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        assert_eq!(
            format!("{}", ViewError::Engine("ceiling rejected".to_string())),
            "Engine command failed: ceiling rejected"
        );
        assert_eq!(
            format!("{}", ViewError::Detached("channel closed".to_string())),
            "View detached: channel closed"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = ConfigError::InvalidValue {
            variable: "GV_TILE_MARGIN".to_string(),
            value: "abc".to_string(),
        };
        let view_err: ViewError = config_err.into();
        assert!(matches!(view_err, ViewError::Config(_)));
    }
}
