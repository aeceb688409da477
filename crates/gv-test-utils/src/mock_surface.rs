//! Mock rendering surface for view testing.
//!
//! Stands in for the host UI's measured container and tiles. By default the
//! sampled tile height follows the last applied render hints, the way a
//! real tile tracks the written CSS variables; tests can override the
//! sample or unmount the container/tiles to exercise the skip paths.

use std::sync::{Arc, Mutex};

use gallery_view::engine::Surface;
use gallery_view::layout::{PixelSize, TileSize};

#[derive(Debug, Default)]
struct SurfaceState {
    container: Option<PixelSize>,
    hints: Option<TileSize>,
    tiles_mounted: bool,
    sample_override: Option<f64>,
}

/// Mock `Surface` sharing state across clones.
///
/// Hand one clone to the view and keep another in the test to adjust
/// measurements and read back the applied render hints.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MockSurface {
    /// Surface with nothing mounted yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with a mounted, measured container and mounted tiles.
    #[must_use]
    pub fn with_container(width: f64, height: f64) -> Self {
        let surface = Self::default();
        {
            let mut state = surface.lock();
            state.container = Some(PixelSize::new(width, height));
            state.tiles_mounted = true;
        }
        surface
    }

    /// Change the measured container size.
    pub fn set_container_size(&self, width: f64, height: f64) {
        self.lock().container = Some(PixelSize::new(width, height));
    }

    /// Simulate the container not being mounted.
    pub fn unmount_container(&self) {
        self.lock().container = None;
    }

    /// Mount or unmount the tiles (without touching the container).
    pub fn set_tiles_mounted(&self, mounted: bool) {
        self.lock().tiles_mounted = mounted;
    }

    /// Override the sampled tile height instead of deriving it from the
    /// last applied hints.
    pub fn set_sample_tile_height(&self, height: Option<f64>) {
        self.lock().sample_override = height;
    }

    /// Render hints last applied by the view, if any.
    #[must_use]
    pub fn render_hints(&self) -> Option<TileSize> {
        self.lock().hints
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SurfaceState> {
        self.state.lock().expect("mock surface lock poisoned")
    }
}

impl Surface for MockSurface {
    fn container_size(&self) -> Option<PixelSize> {
        self.lock().container
    }

    fn sample_tile_height(&self) -> Option<f64> {
        let state = self.lock();
        if !state.tiles_mounted {
            return None;
        }
        state
            .sample_override
            .or_else(|| state.hints.map(|hints| hints.height))
    }

    fn apply_render_hints(&mut self, hints: &TileSize) {
        self.lock().hints = Some(*hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_follows_applied_hints() {
        let mut surface = MockSurface::with_container(1200.0, 800.0);
        assert!(surface.sample_tile_height().is_none());

        surface.apply_render_hints(&TileSize {
            width: 585.0,
            height: 324.6875,
            margin: 5.0,
        });
        assert_eq!(surface.sample_tile_height(), Some(324.6875));

        surface.set_sample_tile_height(Some(100.0));
        assert_eq!(surface.sample_tile_height(), Some(100.0));

        surface.set_tiles_mounted(false);
        assert!(surface.sample_tile_height().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let surface = MockSurface::new();
        assert!(surface.container_size().is_none());

        let clone = surface.clone();
        clone.set_container_size(640.0, 480.0);
        assert_eq!(surface.container_size(), Some(PixelSize::new(640.0, 480.0)));
    }
}
