//! Pure grid geometry.
//!
//! Everything in this module is a function of its arguments: nothing here
//! reads the clock, the environment, or the screen. The view actor feeds
//! measured sizes in and pushes the results out through the host surface.

use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;

/// Measured size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are renderable.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Tile sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropMode {
    /// Fill all available tile area, clipping video content.
    Cropped,
    /// Preserve the configured aspect ratio.
    Uncropped,
}

/// Row/column shape of the grid, derived from the participant count and
/// recomputed on every count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub columns: u32,
}

impl GridDimensions {
    /// Minimal grid for `count` tiles, biased toward wider-than-tall.
    ///
    /// `rows = ceil(sqrt(count))`; a column is dropped only when the
    /// fractional part of the square root is strictly between zero and one
    /// half, so e.g. 5 and 6 get a 3x2 grid while 3 and 7 stay square.
    ///
    /// `count` is at least 1 in practice: the caller always includes the
    /// local participant.
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        let sqrt = (count as f64).sqrt();
        let rows = sqrt.ceil();
        let fraction = sqrt - sqrt.floor();
        let columns = if fraction > 0.0 && fraction < 0.5 {
            rows - 1.0
        } else {
            rows
        };

        Self {
            rows: rows as u32,
            columns: columns as u32,
        }
    }
}

/// Computed per-tile dimensions plus the margin constant, written as render
/// hints for the styling layer rather than persisted model state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl TileSize {
    /// Tile dimensions for `dims` inside `container` under `mode`.
    ///
    /// The usable area excludes the outer margin on every side and the
    /// control chrome at the bottom. In uncropped mode sizing starts
    /// landscape-first and falls back to height-driven sizing when the
    /// stacked rows would overflow the container. The final dimensions
    /// reserve per-tile spacing.
    ///
    /// Non-positive containers produce non-positive tiles on purpose: the
    /// caller skips rendering until a positive measurement exists, and this
    /// function does not clamp.
    #[must_use]
    pub fn compute(
        dims: &GridDimensions,
        container: PixelSize,
        mode: CropMode,
        config: &ViewConfig,
    ) -> Self {
        let combined_margin = config.tile_margin * 2.0;
        let usable_width = container.width - combined_margin;
        let usable_height = container.height - combined_margin - config.chrome_height;
        let rows = f64::from(dims.rows);
        let columns = f64::from(dims.columns);

        let (width, height) = match mode {
            CropMode::Cropped => (usable_width / columns, usable_height / rows),
            CropMode::Uncropped => {
                let width = usable_width / columns;
                let height = width / config.aspect_ratio;

                if height * rows > usable_height {
                    let height = usable_height / rows;
                    (height * config.aspect_ratio, height)
                } else {
                    (width, height)
                }
            }
        };

        Self {
            width: width - combined_margin,
            height: height - combined_margin,
            margin: config.tile_margin,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_grid_dimensions_table() {
        // Exact tie-break table for small counts, fractional part of the
        // square root deciding whether a column is dropped.
        let expected = [
            (1, 1, 1),
            (2, 2, 1),
            (3, 2, 2),
            (4, 2, 2),
            (5, 3, 2),
            (6, 3, 2),
            (7, 3, 3),
            (8, 3, 3),
            (9, 3, 3),
            (10, 4, 3),
            (11, 4, 3),
            (12, 4, 3),
        ];

        for (count, rows, columns) in expected {
            let dims = GridDimensions::for_count(count);
            assert_eq!(
                (dims.rows, dims.columns),
                (rows, columns),
                "count {count}"
            );
        }
    }

    #[test]
    fn test_grid_is_minimal_for_all_counts() {
        for count in 1..=50u32 {
            let dims = GridDimensions::for_count(count as usize);
            assert!(
                dims.rows * dims.columns >= count,
                "count {count}: grid {dims:?} too small"
            );
            assert!(
                (dims.rows - 1) * dims.columns < count,
                "count {count}: grid {dims:?} has a spare row"
            );
        }
    }

    #[test]
    fn test_cropped_mode_fills_usable_area() {
        let config = ViewConfig::default();
        let dims = GridDimensions::for_count(4);
        let tile = TileSize::compute(
            &dims,
            PixelSize::new(1200.0, 800.0),
            CropMode::Cropped,
            &config,
        );

        // usable = (1190, 735); 2x2 grid; minus per-tile margin.
        assert_close(tile.width, 1190.0 / 2.0 - 10.0);
        assert_close(tile.height, 735.0 / 2.0 - 10.0);
        assert_close(tile.margin, 5.0);
    }

    #[test]
    fn test_uncropped_landscape_branch() {
        // 3 participants in a 1200x800 container: sqrt(3) has fractional
        // part 0.732, so the grid is 2x2 and the landscape-first sizing
        // fits without the height fallback.
        let config = ViewConfig::default();
        let dims = GridDimensions::for_count(3);
        assert_eq!((dims.rows, dims.columns), (2, 2));

        let tile = TileSize::compute(
            &dims,
            PixelSize::new(1200.0, 800.0),
            CropMode::Uncropped,
            &config,
        );

        // width = 1190/2 = 595; height = 595/(16/9) = 334.6875;
        // 334.6875 * 2 = 669.375 <= 735, landscape holds.
        assert_close(tile.width, 585.0);
        assert_close(tile.height, 324.6875);
    }

    #[test]
    fn test_uncropped_height_fallback_branch() {
        // A short, wide container: landscape-first tiles would stack taller
        // than the usable height, so sizing flips to height-driven.
        let config = ViewConfig::default();
        let dims = GridDimensions::for_count(3);

        let container = PixelSize::new(1200.0, 400.0);
        let usable_height = 400.0 - 10.0 - 55.0;
        // Landscape height would be 334.6875 per row; 2 rows overflow 335.
        let tile = TileSize::compute(&dims, container, CropMode::Uncropped, &config);

        let height = usable_height / 2.0;
        assert_close(tile.height, height - 10.0);
        assert_close(tile.width, height * (16.0 / 9.0) - 10.0);
    }

    #[test]
    fn test_non_positive_container_passes_through() {
        let config = ViewConfig::default();
        let dims = GridDimensions::for_count(1);
        let tile = TileSize::compute(
            &dims,
            PixelSize::new(0.0, 0.0),
            CropMode::Cropped,
            &config,
        );

        // No clamping here; the caller skips rendering on non-positive sizes.
        assert!(tile.width < 0.0);
        assert!(tile.height < 0.0);
    }

    #[test]
    fn test_pixel_size_positivity() {
        assert!(PixelSize::new(1.0, 1.0).is_positive());
        assert!(!PixelSize::new(0.0, 1.0).is_positive());
        assert!(!PixelSize::new(1.0, -5.0).is_positive());
    }
}
