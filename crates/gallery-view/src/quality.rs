//! Receive-quality adaptation driven by rendered tile size.
//!
//! After every layout pass the controller samples one representative
//! rendered tile and asks the engine to cap incoming video at the matching
//! tier. Tiles are uniform by construction in this grid, so a single sample
//! stands in for all of them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::EngineCommands;

/// Discrete vertical-resolution ceiling requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    P180,
    P360,
    P720,
    P1080,
}

impl QualityTier {
    /// Tier for a rendered tile height in pixels.
    ///
    /// These breakpoints are tuned for wide tiles; cropped vertical tiles
    /// land on the same scale.
    #[must_use]
    pub fn for_tile_height(height: f64) -> Self {
        if height < 180.0 {
            QualityTier::P180
        } else if height < 500.0 {
            QualityTier::P360
        } else if height < 1000.0 {
            QualityTier::P720
        } else {
            QualityTier::P1080
        }
    }

    /// Vertical resolution in lines.
    #[must_use]
    pub fn vertical_resolution(self) -> u32 {
        match self {
            QualityTier::P180 => 180,
            QualityTier::P360 => 360,
            QualityTier::P720 => 720,
            QualityTier::P1080 => 1080,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.vertical_resolution())
    }
}

/// Issues quality commands to the engine after each layout pass.
pub struct QualityController {
    engine: Arc<dyn EngineCommands>,
}

impl QualityController {
    #[must_use]
    pub fn new(engine: Arc<dyn EngineCommands>) -> Self {
        Self { engine }
    }

    /// Request the tier matching the sampled tile height.
    ///
    /// Commands are re-issued on every pass and never retried. A missing
    /// sample (no tile mounted yet) skips the pass with a diagnostic; a
    /// failed command keeps whatever the engine last accepted.
    pub fn apply(&self, sample_tile_height: Option<f64>) {
        let Some(height) = sample_tile_height else {
            warn!(
                target: "gv.quality",
                "no rendered tile to sample, skipping quality update"
            );
            return;
        };

        let tier = QualityTier::for_tile_height(height);
        debug!(
            target: "gv.quality",
            tile_height = height,
            tier = %tier,
            "requesting receiver quality ceiling"
        );

        if let Err(error) = self.engine.select_all_participants() {
            warn!(target: "gv.quality", error = %error, "select_all_participants failed");
            return;
        }
        if let Err(error) = self.engine.set_receiver_quality_ceiling(tier) {
            warn!(target: "gv.quality", error = %error, "set_receiver_quality_ceiling failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        // Boundary table from the sizing breakpoints.
        assert_eq!(QualityTier::for_tile_height(179.0), QualityTier::P180);
        assert_eq!(QualityTier::for_tile_height(180.0), QualityTier::P360);
        assert_eq!(QualityTier::for_tile_height(499.0), QualityTier::P360);
        assert_eq!(QualityTier::for_tile_height(500.0), QualityTier::P720);
        assert_eq!(QualityTier::for_tile_height(999.0), QualityTier::P720);
        assert_eq!(QualityTier::for_tile_height(1000.0), QualityTier::P1080);
    }

    #[test]
    fn test_tier_ordering_and_resolution() {
        assert!(QualityTier::P180 < QualityTier::P1080);
        assert_eq!(QualityTier::P360.vertical_resolution(), 360);
        assert_eq!(format!("{}", QualityTier::P720), "720p");
    }
}
